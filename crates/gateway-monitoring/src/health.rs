use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

impl HealthStatus {
	pub fn is_healthy(&self) -> bool {
		matches!(self, HealthStatus::Healthy)
	}
}

/// Health check result with details
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
	pub status: HealthStatus,
	pub message: String,
	pub duration: Duration,
	pub details: HashMap<String, String>,
}

impl HealthCheckResult {
	pub fn healthy(message: impl Into<String>, duration: Duration) -> Self {
		Self {
			status: HealthStatus::Healthy,
			message: message.into(),
			duration,
			details: HashMap::new(),
		}
	}

	pub fn unhealthy(message: impl Into<String>, duration: Duration) -> Self {
		Self {
			status: HealthStatus::Unhealthy,
			message: message.into(),
			duration,
			details: HashMap::new(),
		}
	}

	pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.details.insert(key.into(), value.into());
		self
	}
}

/// Trait for implementing health checks
#[async_trait::async_trait]
pub trait HealthCheck: Send + Sync {
	async fn check(&self) -> HealthCheckResult;
	fn name(&self) -> &str;
}

/// Outcome of running every registered check once.
#[derive(Debug, Clone)]
pub struct HealthReport {
	pub status: HealthStatus,
	pub checks: Vec<(String, HealthCheckResult)>,
}

impl HealthReport {
	/// Messages of the failing checks, one per line.
	pub fn failures(&self) -> String {
		self.checks
			.iter()
			.filter(|(_, result)| !result.status.is_healthy())
			.map(|(name, result)| format!("{}: {}", name, result.message))
			.collect::<Vec<_>>()
			.join("\n")
	}
}

/// Runs registered health checks on demand.
#[derive(Default)]
pub struct HealthChecker {
	checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthChecker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_check(&mut self, check: Box<dyn HealthCheck>) {
		info!("Registered health check: {}", check.name());
		self.checks.push(check);
	}

	/// Runs every check in registration order. The report is unhealthy as
	/// soon as one check is.
	pub async fn run_all_checks(&self) -> HealthReport {
		let mut checks = Vec::with_capacity(self.checks.len());
		let mut status = HealthStatus::Healthy;

		for check in &self.checks {
			let start = Instant::now();
			debug!("Running health check: {}", check.name());

			let result = check.check().await;
			let elapsed = start.elapsed();

			if result.status.is_healthy() {
				debug!("Health check '{}' passed in {:?}", check.name(), elapsed);
			} else {
				warn!(
					"Health check '{}' failed in {:?}: {}",
					check.name(),
					elapsed,
					result.message
				);
				status = HealthStatus::Unhealthy;
			}

			checks.push((check.name().to_string(), result));
		}

		HealthReport { status, checks }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedCheck {
		name: &'static str,
		healthy: bool,
	}

	#[async_trait::async_trait]
	impl HealthCheck for FixedCheck {
		async fn check(&self) -> HealthCheckResult {
			if self.healthy {
				HealthCheckResult::healthy("fine", Duration::ZERO)
			} else {
				HealthCheckResult::unhealthy("solver crashed", Duration::ZERO)
					.with_detail("exit", "139")
			}
		}

		fn name(&self) -> &str {
			self.name
		}
	}

	#[tokio::test]
	async fn test_empty_checker_is_healthy() {
		let report = HealthChecker::new().run_all_checks().await;
		assert_eq!(report.status, HealthStatus::Healthy);
		assert!(report.checks.is_empty());
	}

	#[tokio::test]
	async fn test_one_failure_makes_report_unhealthy() {
		let mut checker = HealthChecker::new();
		checker.register_check(Box::new(FixedCheck {
			name: "first",
			healthy: true,
		}));
		checker.register_check(Box::new(FixedCheck {
			name: "second",
			healthy: false,
		}));

		let report = checker.run_all_checks().await;
		assert_eq!(report.status, HealthStatus::Unhealthy);
		assert_eq!(report.checks.len(), 2);
		assert_eq!(report.checks[0].0, "first");
		assert_eq!(report.failures(), "second: solver crashed");
		assert_eq!(report.checks[1].1.details["exit"], "139");
	}
}
