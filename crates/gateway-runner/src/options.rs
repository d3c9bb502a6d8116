//! Translation of configuration and request options into solver flags.

use gateway_config::GatewayConfig;
use gateway_types::SolverInvocation;
use serde_json::{Map, Value};

/// Flags that depend only on configuration, computed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFlags {
	flags: Vec<String>,
	geometry: bool,
	plan_mode: bool,
}

impl StaticFlags {
	/// `-r <router>`, then `-a profile:host` / `-p profile:port` for every
	/// profile of that router, then `-g` and `-c` when enabled by default.
	pub fn from_config(config: &GatewayConfig) -> Self {
		let solver = &config.solver;
		let mut flags = vec!["-r".to_string(), solver.router.clone()];

		if let Some(profiles) = config.active_profiles() {
			for (profile, server) in profiles {
				flags.push("-a".to_string());
				flags.push(format!("{}:{}", profile, server.host));
				flags.push("-p".to_string());
				flags.push(format!("{}:{}", profile, server.port));
			}
		}

		if solver.geometry {
			flags.push("-g".to_string());
		}
		if solver.plan_mode {
			flags.push("-c".to_string());
		}

		Self {
			flags,
			geometry: solver.geometry,
			plan_mode: solver.plan_mode,
		}
	}

	pub fn flags(&self) -> &[String] {
		&self.flags
	}
}

/// Derives a fresh [`SolverInvocation`] per request from the static flags.
#[derive(Debug, Clone)]
pub struct OptionTranslator {
	static_flags: StaticFlags,
	allow_override: bool,
	threads: u32,
	explore: u32,
}

impl OptionTranslator {
	pub fn from_config(config: &GatewayConfig) -> Self {
		Self {
			static_flags: StaticFlags::from_config(config),
			allow_override: config.solver.allow_override,
			threads: config.solver.threads,
			explore: config.solver.explore,
		}
	}

	pub fn static_flags(&self) -> &StaticFlags {
		&self.static_flags
	}

	/// Applies the request's `options` when overrides are allowed: `g` and
	/// `c` (booleans), `t` and `x` (thread count and exploration level), `l`
	/// (passed as `-l`). Values of any other type are ignored. `-t` and `-x`
	/// always close the list.
	pub fn translate(&self, options: Option<&Map<String, Value>>) -> SolverInvocation {
		let mut flags = self.static_flags.flags.clone();
		let mut threads = self.threads;
		let mut explore = self.explore;

		if let Some(options) = options.filter(|_| self.allow_override) {
			if is_true(options, "g") && !self.static_flags.geometry {
				flags.push("-g".to_string());
			}
			if is_true(options, "c") && !self.static_flags.plan_mode {
				flags.push("-c".to_string());
			}
			if let Some(t) = small_uint(options, "t") {
				threads = t;
			}
			if let Some(x) = small_uint(options, "x") {
				explore = x;
			}
			if let Some(limit) = options.get("l").and_then(Value::as_u64) {
				flags.push("-l".to_string());
				flags.push(limit.to_string());
			}
		}

		SolverInvocation::with_resources(flags, threads, explore)
	}
}

fn is_true(options: &Map<String, Value>, key: &str) -> bool {
	options.get(key).and_then(Value::as_bool) == Some(true)
}

fn small_uint(options: &Map<String, Value>, key: &str) -> Option<u32> {
	options
		.get(key)
		.and_then(Value::as_u64)
		.and_then(|v| u32::try_from(v).ok())
}
