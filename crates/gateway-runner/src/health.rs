//! Liveness probe that runs the solver on a tiny bundled problem.

use crate::process::SolverCommand;
use crate::request_file::RequestFile;
use async_trait::async_trait;
use gateway_monitoring::{HealthCheck, HealthCheckResult};
use gateway_types::{ExitOutcome, SolverInvocation};
use std::path::PathBuf;
use std::time::Instant;

/// Two jobs and one vehicle over a custom duration matrix, so no routing
/// server is needed.
pub const HEALTH_FIXTURE: &str = include_str!("../fixtures/health_custom_matrix.json");

/// Healthy when the solver starts and writes nothing to stderr.
pub struct SolverHealthCheck {
	command: SolverCommand,
	work_dir: PathBuf,
}

impl SolverHealthCheck {
	pub fn new(command: SolverCommand, work_dir: PathBuf) -> Self {
		Self { command, work_dir }
	}
}

#[async_trait]
impl HealthCheck for SolverHealthCheck {
	async fn check(&self) -> HealthCheckResult {
		let start = Instant::now();

		let file = match RequestFile::create(&self.work_dir, HEALTH_FIXTURE.as_bytes()).await {
			Ok(file) => file,
			Err(e) => return HealthCheckResult::unhealthy(e.to_string(), start.elapsed()),
		};
		let result = self
			.command
			.run(&SolverInvocation::new(Vec::new()), file.path())
			.await;
		file.reap().await;

		if let ExitOutcome::SpawnFailed { command, reason } = &result.outcome {
			return HealthCheckResult::unhealthy(
				format!("Unfound command: {}", command),
				start.elapsed(),
			)
			.with_detail("reason", reason.clone());
		}

		if !result.stderr.is_empty() {
			return HealthCheckResult::unhealthy(result.stderr.trim_end(), start.elapsed());
		}

		let result_detail = format!("{:?}", result.outcome);
		HealthCheckResult::healthy("OK", start.elapsed()).with_detail("outcome", result_detail)
	}

	fn name(&self) -> &str {
		"solver"
	}
}
