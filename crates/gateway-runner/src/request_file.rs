//! Temporary request files handed to the solver with `-i`.

use crate::errors::RunnerError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// A request written to disk for exactly one solver run.
///
/// Call [`RequestFile::reap`] once the solver has exited.
#[derive(Debug)]
pub struct RequestFile {
	path: PathBuf,
}

impl RequestFile {
	/// Writes `contents` to a new, uniquely named file in `dir`, creating the
	/// directory if needed.
	pub async fn create(dir: &Path, contents: &[u8]) -> Result<Self, RunnerError> {
		fs::create_dir_all(dir)
			.await
			.map_err(|source| RunnerError::RequestFile {
				path: dir.to_path_buf(),
				source,
			})?;

		let path = dir.join(Self::file_name(Utc::now()));
		let write = async {
			let mut file = fs::OpenOptions::new()
				.write(true)
				.create_new(true)
				.open(&path)
				.await?;
			file.write_all(contents).await?;
			file.flush().await
		};
		if let Err(source) = write.await {
			return Err(RunnerError::RequestFile { path, source });
		}

		debug!("Wrote request file {}", path.display());
		Ok(Self { path })
	}

	/// `<date>_<time>_<uuid>.json`, e.g. `2024-05-02_143501_<uuid>.json`.
	pub fn file_name(now: DateTime<Utc>) -> String {
		format!("{}_{}.json", now.format("%Y-%m-%d_%H%M%S"), Uuid::new_v4())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Deletes the file if it is still there. Never fails.
	pub async fn reap(self) {
		match fs::try_exists(&self.path).await {
			Ok(true) => match fs::remove_file(&self.path).await {
				Ok(()) => debug!("Removed request file {}", self.path.display()),
				Err(e) => warn!(
					"Failed to remove request file {}: {}",
					self.path.display(),
					e
				),
			},
			Ok(false) => debug!("Request file {} already removed", self.path.display()),
			Err(e) => warn!(
				"Could not check request file {}: {}",
				self.path.display(),
				e
			),
		}
	}
}
