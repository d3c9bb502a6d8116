//! Configuration types for the gateway.

use crate::serde_helpers::deserialize_port;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Routing servers by router backend, then by vehicle profile.
///
/// Sorted maps keep the generated solver flags in a stable order.
pub type RoutingServers = BTreeMap<String, BTreeMap<String, RoutingServer>>;

/// Complete gateway configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
	/// HTTP listener settings
	pub server: ServerConfig,
	/// Solver binary and its defaults
	pub solver: SolverConfig,
	/// Routing servers the solver may query, keyed by router then profile
	pub routing_servers: RoutingServers,
	/// Webhook delivery settings
	pub callback: CallbackConfig,
}

impl GatewayConfig {
	/// Profiles configured for the router the solver is set up to use.
	pub fn active_profiles(&self) -> Option<&BTreeMap<String, RoutingServer>> {
		self.routing_servers.get(&self.solver.router)
	}
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Path the solve endpoint is mounted on; `health` is served below it
	pub base_url: String,
	/// Upper bound on a single HTTP request, solver time included
	pub request_timeout_secs: u64,
	pub max_body_bytes: usize,
	/// Directory receiving the temporary request files
	pub log_dir: PathBuf,
	pub log_level: String,
	pub json_logs: bool,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
			base_url: "/".to_string(),
			request_timeout_secs: 300,
			max_body_bytes: 1024 * 1024,
			log_dir: PathBuf::from("./logs"),
			log_level: "info".to_string(),
			json_logs: false,
		}
	}
}

/// Solver binary and the defaults it runs with
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
	/// Solver executable, looked up on `PATH` when not absolute
	pub command: String,
	/// Arguments placed before any generated flag
	pub leading_args: Vec<String>,
	/// Routing backend passed as `-r`
	pub router: String,
	/// Request route geometry by default (`-g`)
	pub geometry: bool,
	/// Run in plan mode by default (`-c`)
	pub plan_mode: bool,
	pub threads: u32,
	pub explore: u32,
	/// Let requests override geometry, plan mode, threads, exploration and limit
	pub allow_override: bool,
	pub max_locations: usize,
	pub max_vehicles: usize,
}

impl Default for SolverConfig {
	fn default() -> Self {
		Self {
			command: "vroom".to_string(),
			leading_args: Vec::new(),
			router: "osrm".to_string(),
			geometry: false,
			plan_mode: false,
			threads: 4,
			explore: 5,
			allow_override: true,
			max_locations: 1000,
			max_vehicles: 200,
		}
	}
}

/// Address of one routing server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoutingServer {
	pub host: String,
	#[serde(deserialize_with = "deserialize_port")]
	pub port: String,
}

/// Webhook delivery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CallbackConfig {
	pub timeout_secs: u64,
}

impl Default for CallbackConfig {
	fn default() -> Self {
		Self { timeout_secs: 30 }
	}
}
