use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a request before the solver is started.
#[derive(Error, Debug)]
pub enum RunnerError {
	#[error("Failed to write request file {}: {source}", .path.display())]
	RequestFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to encode request: {0}")]
	Encode(#[from] serde_json::Error),
}
