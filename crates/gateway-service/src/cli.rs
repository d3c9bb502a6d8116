//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use gateway_config::{ConfigError, ConfigLoader, GatewayConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "routing-gateway")]
#[command(about = "HTTP front-end for a vehicle routing solver", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file (TOML, JSON or YAML)
	#[arg(short, long, env = "GATEWAY_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Emit logs as JSON
	#[arg(long)]
	pub json_logs: bool,

	/// Port to listen on
	#[arg(long)]
	pub port: Option<u16>,

	/// Routing backend used by the solver (osrm, ors, valhalla)
	#[arg(long)]
	pub router: Option<String>,

	/// Allow requests to override solver options
	#[arg(long = "override", value_name = "BOOL")]
	pub allow_override: Option<bool>,

	/// Return route geometry by default
	#[arg(long)]
	pub geometry: bool,

	/// Run the solver in plan mode by default
	#[arg(long)]
	pub planmode: bool,

	/// Default solver thread count
	#[arg(long)]
	pub threads: Option<u32>,

	/// Default exploration level (0-5)
	#[arg(long)]
	pub explore: Option<u32>,

	/// Maximum number of locations per request
	#[arg(long)]
	pub maxlocations: Option<usize>,

	/// Maximum number of vehicles per request
	#[arg(long)]
	pub maxvehicles: Option<usize>,

	/// Directory for temporary request files
	#[arg(long)]
	pub logdir: Option<PathBuf>,

	/// Request timeout in seconds
	#[arg(long)]
	pub timeout: Option<u64>,

	/// Path the API is mounted on
	#[arg(long)]
	pub baseurl: Option<String>,

	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Start the HTTP server (default)
	Start,
	/// Validate the configuration and exit
	Validate,
}

impl Args {
	/// Loads the configuration file and environment, applies command-line
	/// overrides, then validates the combined result once.
	pub fn load_config(&self) -> Result<GatewayConfig, ConfigError> {
		let mut loader = ConfigLoader::new();
		if let Some(path) = &self.config {
			loader = loader.with_file(path);
		}
		let mut config = loader.resolve()?;
		self.apply_overrides(&mut config);
		ConfigLoader::validate(&config)?;
		Ok(config)
	}

	/// Applies command-line values on top of the loaded configuration.
	/// Boolean switches only ever turn features on.
	pub fn apply_overrides(&self, config: &mut GatewayConfig) {
		if let Some(level) = &self.log_level {
			config.server.log_level = level.clone();
		}
		if self.json_logs {
			config.server.json_logs = true;
		}
		if let Some(port) = self.port {
			config.server.port = port;
		}
		if let Some(router) = &self.router {
			config.solver.router = router.clone();
		}
		if let Some(allow) = self.allow_override {
			config.solver.allow_override = allow;
		}
		if self.geometry {
			config.solver.geometry = true;
		}
		if self.planmode {
			config.solver.plan_mode = true;
		}
		if let Some(threads) = self.threads {
			config.solver.threads = threads;
		}
		if let Some(explore) = self.explore {
			config.solver.explore = explore;
		}
		if let Some(max) = self.maxlocations {
			config.solver.max_locations = max;
		}
		if let Some(max) = self.maxvehicles {
			config.solver.max_vehicles = max;
		}
		if let Some(dir) = &self.logdir {
			config.server.log_dir = dir.clone();
		}
		if let Some(timeout) = self.timeout {
			config.server.request_timeout_secs = timeout;
		}
		if let Some(base) = &self.baseurl {
			config.server.base_url = base.clone();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn config_file(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	#[test]
	fn test_defaults_leave_config_untouched() {
		let args = Args::try_parse_from(["routing-gateway"]).unwrap();
		let mut config = GatewayConfig::default();
		args.apply_overrides(&mut config);

		let defaults = GatewayConfig::default();
		assert_eq!(config.server.port, defaults.server.port);
		assert_eq!(config.solver.allow_override, defaults.solver.allow_override);
		assert!(!config.solver.geometry);
		assert_eq!(args.command, None);
	}

	#[test]
	fn test_overrides() {
		let args = Args::try_parse_from([
			"routing-gateway",
			"--port",
			"3100",
			"--router",
			"valhalla",
			"--override",
			"false",
			"--geometry",
			"--threads",
			"8",
			"--explore",
			"2",
			"--maxlocations",
			"50",
			"--baseurl",
			"/vroom/",
			"validate",
		])
		.unwrap();

		let mut config = GatewayConfig::default();
		args.apply_overrides(&mut config);

		assert_eq!(config.server.port, 3100);
		assert_eq!(config.solver.router, "valhalla");
		assert!(!config.solver.allow_override);
		assert!(config.solver.geometry);
		assert!(!config.solver.plan_mode);
		assert_eq!(config.solver.threads, 8);
		assert_eq!(config.solver.explore, 2);
		assert_eq!(config.solver.max_locations, 50);
		assert_eq!(config.server.base_url, "/vroom/");
		assert_eq!(args.command, Some(Command::Validate));
	}

	#[test]
	fn test_command_line_fixes_invalid_file_value() {
		let file = config_file("[solver]\nexplore = 7\n");
		let path = file.path().to_str().unwrap();

		let args = Args::try_parse_from(["routing-gateway", "--config", path, "--explore", "3"]).unwrap();
		let config = args.load_config().unwrap();
		assert_eq!(config.solver.explore, 3);

		let args = Args::try_parse_from(["routing-gateway", "--config", path]).unwrap();
		assert!(matches!(args.load_config(), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_command_line_value_is_validated() {
		let file = config_file("[solver]\nthreads = 2\n");
		let path = file.path().to_str().unwrap();

		let args = Args::try_parse_from(["routing-gateway", "--config", path, "--threads", "0"]).unwrap();
		assert!(matches!(args.load_config(), Err(ConfigError::Validation(_))));
	}
}
