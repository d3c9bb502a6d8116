//! Outcome of one solver process.

/// How the solver process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
	/// The process ran to completion with this exit code.
	Exited(i32),
	/// The process ended without an exit code (killed by a signal) or could
	/// not be waited on.
	Terminated(String),
	/// The process never started.
	SpawnFailed { command: String, reason: String },
}

/// Everything captured from a solver run, produced once the process is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult {
	pub outcome: ExitOutcome,
	pub stdout: Vec<u8>,
	pub stderr: String,
}

impl SolverResult {
	pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			outcome: ExitOutcome::SpawnFailed {
				command: command.into(),
				reason: reason.into(),
			},
			stdout: Vec::new(),
			stderr: String::new(),
		}
	}

	pub fn exit_code(&self) -> Option<i32> {
		match self.outcome {
			ExitOutcome::Exited(code) => Some(code),
			_ => None,
		}
	}
}
