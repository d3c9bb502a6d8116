//! Configuration loading from files and environment.

use crate::types::GatewayConfig;
use crate::ConfigError;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "GATEWAY_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads the file (or defaults when none was given), applies environment
	/// overrides and validates the result.
	pub fn load(&self) -> Result<GatewayConfig, ConfigError> {
		let config = self.resolve()?;
		Self::validate(&config)?;
		Ok(config)
	}

	/// Like [`load`](Self::load) but without validation, for callers that
	/// layer further overrides on top before validating.
	pub fn resolve(&self) -> Result<GatewayConfig, ConfigError> {
		let mut config = match &self.file_path {
			Some(path) => Self::from_file(path)?,
			None => {
				info!("No configuration file given, using defaults");
				GatewayConfig::default()
			}
		};

		self.apply_env_overrides(&mut config)?;
		Ok(config)
	}

	/// Parses a file, choosing the format from its extension.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<GatewayConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		let contents = substitute_env_vars(&contents)?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents),
			Some("json") => Self::from_json(&contents),
			Some("yaml") | Some("yml") => Self::from_yaml(&contents),
			_ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
		}
	}

	pub fn from_toml(contents: &str) -> Result<GatewayConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	pub fn from_json(contents: &str) -> Result<GatewayConfig, ConfigError> {
		serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	pub fn from_yaml(contents: &str) -> Result<GatewayConfig, ConfigError> {
		serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	fn env_var(&self, name: &str) -> Option<String> {
		env::var(format!("{}{}", self.env_prefix, name)).ok()
	}

	fn apply_env_overrides(&self, config: &mut GatewayConfig) -> Result<(), ConfigError> {
		if let Some(port) = self.env_var("PORT") {
			debug!("Overriding port from environment");
			config.server.port = port
				.parse()
				.map_err(|e| ConfigError::Validation(format!("Invalid port: {}", e)))?;
		}

		if let Some(level) = self.env_var("LOG_LEVEL") {
			config.server.log_level = level;
		}

		if let Some(dir) = self.env_var("LOG_DIR") {
			config.server.log_dir = PathBuf::from(dir);
		}

		if let Some(command) = self.env_var("SOLVER_COMMAND") {
			debug!("Overriding solver command from environment");
			config.solver.command = command;
		}

		if let Some(router) = self.env_var("ROUTER") {
			config.solver.router = router;
		}

		Ok(())
	}

	/// Rejects settings the gateway cannot run with.
	pub fn validate(config: &GatewayConfig) -> Result<(), ConfigError> {
		let solver = &config.solver;

		if solver.command.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Solver command must not be empty".to_string(),
			));
		}

		if solver.router.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Router must not be empty".to_string(),
			));
		}

		if solver.threads == 0 {
			return Err(ConfigError::Validation(
				"Thread count must be at least 1".to_string(),
			));
		}

		if solver.explore > 5 {
			return Err(ConfigError::Validation(format!(
				"Exploration level must be between 0 and 5, got {}",
				solver.explore
			)));
		}

		if solver.max_locations == 0 || solver.max_vehicles == 0 {
			return Err(ConfigError::Validation(
				"Location and vehicle limits must be at least 1".to_string(),
			));
		}

		if !config.server.base_url.starts_with('/') {
			return Err(ConfigError::Validation(format!(
				"Base URL must start with '/', got '{}'",
				config.server.base_url
			)));
		}

		Ok(())
	}
}

/// Replaces every `${VAR_NAME}` with the value of that environment variable.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));

	let mut result = content.to_string();
	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
		result = result.replace(full_match, &value);
	}

	Ok(result)
}
