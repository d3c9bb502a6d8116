//! Configuration for the routing gateway.
//!
//! Configuration is read from a TOML, JSON or YAML file, `${VAR}` references
//! are substituted from the environment, `GATEWAY_*` variables override a
//! handful of common settings, and the result is validated before use. The
//! service binary layers command-line flags on top.

pub mod loader;
pub mod serde_helpers;
pub mod types;

use thiserror::Error;

pub use loader::ConfigLoader;
pub use types::{
	CallbackConfig, GatewayConfig, RoutingServer, RoutingServers, ServerConfig, SolverConfig,
};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("Validation error: {0}")]
	Validation(String),
}
