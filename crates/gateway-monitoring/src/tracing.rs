use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Layer};

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
	/// Filter directive used when `RUST_LOG` is not set, e.g. `info`
	pub level: String,
	pub with_thread_ids: bool,
	pub with_file_and_line: bool,
	pub with_target: bool,
	pub with_span_events: FmtSpan,
	pub json_format: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: true,
			with_span_events: FmtSpan::NONE,
			json_format: false,
		}
	}
}

impl TracingConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	pub fn with_json_format(mut self, json: bool) -> Self {
		self.json_format = json;
		self
	}

	pub fn debug() -> Self {
		Self {
			level: "debug".to_string(),
			with_thread_ids: true,
			with_file_and_line: true,
			with_target: true,
			with_span_events: FmtSpan::CLOSE,
			json_format: false,
		}
	}

	pub fn production() -> Self {
		Self {
			level: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: false,
			with_span_events: FmtSpan::NONE,
			json_format: true,
		}
	}

	/// Picks a preset from the service settings: `production` for JSON logs,
	/// `debug` for a `debug` or `trace` level, the defaults otherwise. The
	/// configured level always wins over the preset's.
	pub fn for_service(level: &str, json: bool) -> Self {
		let preset = if json {
			Self::production()
		} else if matches!(level, "debug" | "trace") {
			Self::debug()
		} else {
			Self::new()
		};
		preset.with_level(level)
	}

	fn env_filter(&self) -> EnvFilter {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
	}
}

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: TracingConfig) -> Result<(), Box<dyn std::error::Error>> {
	let fmt_layer = tracing_subscriber::fmt::layer()
		.with_span_events(config.with_span_events.clone())
		.with_thread_ids(config.with_thread_ids)
		.with_file(config.with_file_and_line)
		.with_line_number(config.with_file_and_line)
		.with_target(config.with_target);

	let fmt_layer = if config.json_format {
		fmt_layer.json().boxed()
	} else {
		fmt_layer.boxed()
	};

	tracing_subscriber::registry()
		.with(config.env_filter())
		.with(fmt_layer)
		.try_init()
		.map_err(|e| format!("Failed to initialize tracing: {}", e))?;

	info!("Tracing initialized with level: {}", config.level);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_presets() {
		assert!(TracingConfig::production().json_format);
		assert_eq!(TracingConfig::debug().level, "debug");
		assert_eq!(
			TracingConfig::new().with_level("warn").with_json_format(true).level,
			"warn"
		);
	}

	#[test]
	fn test_service_presets() {
		let json = TracingConfig::for_service("warn", true);
		assert!(json.json_format);
		assert!(!json.with_target);
		assert_eq!(json.level, "warn");

		let verbose = TracingConfig::for_service("trace", false);
		assert!(verbose.with_file_and_line);
		assert!(!verbose.json_format);
		assert_eq!(verbose.level, "trace");

		let plain = TracingConfig::for_service("info", false);
		assert!(!plain.with_thread_ids);
		assert!(plain.with_target);
	}

	#[test]
	fn test_second_init_fails() {
		let _ = init_tracing(TracingConfig::default());
		assert!(init_tracing(TracingConfig::default()).is_err());
	}
}
