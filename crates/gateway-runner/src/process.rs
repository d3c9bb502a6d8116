//! Running the solver binary.

use gateway_config::SolverConfig;
use gateway_types::{ExitOutcome, SolverInvocation, SolverResult};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tracing::{debug, error, warn};

/// The solver executable and any fixed arguments placed before the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverCommand {
	program: String,
	leading_args: Vec<String>,
}

impl SolverCommand {
	pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
		Self {
			program: program.into(),
			leading_args,
		}
	}

	pub fn from_config(config: &SolverConfig) -> Self {
		Self::new(config.command.clone(), config.leading_args.clone())
	}

	pub fn program(&self) -> &str {
		&self.program
	}

	/// Runs the solver on `input` and waits for it to exit.
	///
	/// Stdout is collected in full, stderr is forwarded to the log line by
	/// line as it arrives, and both are returned together with the exit
	/// status once the process is gone.
	pub async fn run(&self, invocation: &SolverInvocation, input: &Path) -> SolverResult {
		let mut command = Command::new(&self.program);
		command
			.args(&self.leading_args)
			.args(invocation.args_with_input(input))
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped());

		debug!(
			"Starting {} {}",
			self.program,
			invocation.flags().join(" ")
		);

		let mut child = match command.spawn() {
			Ok(child) => child,
			Err(e) => {
				error!("Failed to start solver '{}': {}", self.program, e);
				return SolverResult::spawn_failed(&self.program, e.to_string());
			}
		};

		let stdout = child.stdout.take();
		let stderr = child.stderr.take();
		let (stdout, stderr, status) = tokio::join!(
			collect_stdout(stdout),
			relay_stderr(stderr),
			child.wait()
		);

		let outcome = match status {
			Ok(status) => match status.code() {
				Some(code) => ExitOutcome::Exited(code),
				None => ExitOutcome::Terminated(format!("solver terminated: {}", status)),
			},
			Err(e) => ExitOutcome::Terminated(format!("failed to wait for solver: {}", e)),
		};
		debug!("Solver finished: {:?}", outcome);

		SolverResult {
			outcome,
			stdout,
			stderr,
		}
	}
}

async fn collect_stdout(pipe: Option<ChildStdout>) -> Vec<u8> {
	let mut buffer = Vec::new();
	if let Some(mut pipe) = pipe {
		if let Err(e) = pipe.read_to_end(&mut buffer).await {
			warn!("Failed to read solver stdout: {}", e);
		}
	}
	buffer
}

/// Forwards stderr to the log one line at a time and returns all of it.
///
/// Lines are read as raw bytes so output that is not UTF-8 is still logged
/// and collected. The pipe is drained until EOF even after a read error, so
/// the solver never writes into a closed pipe.
async fn relay_stderr(pipe: Option<ChildStderr>) -> String {
	let mut collected = String::new();
	let Some(pipe) = pipe else {
		return collected;
	};

	let mut reader = BufReader::new(pipe);
	let mut line = Vec::new();
	loop {
		line.clear();
		match reader.read_until(b'\n', &mut line).await {
			Ok(0) => break,
			Ok(_) => {
				let text = String::from_utf8_lossy(trim_line_ending(&line));
				warn!(target: "solver", "{}", text);
				collected.push_str(&text);
				collected.push('\n');
			}
			Err(e) => {
				warn!("Failed to read solver stderr: {}", e);
				if let Err(e) = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await {
					warn!("Failed to drain solver stderr: {}", e);
				}
				break;
			}
		}
	}
	collected
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
	let line = line.strip_suffix(b"\n").unwrap_or(line);
	line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;

	fn stub(script: &str) -> SolverCommand {
		SolverCommand::new(
			"/bin/sh",
			vec!["-c".to_string(), script.to_string(), "stub-solver".to_string()],
		)
	}

	#[tokio::test]
	async fn test_captures_stdout_and_exit_code() {
		let command = stub(r#"printf '{"code":0}'; exit 0"#);
		let result = command
			.run(&SolverInvocation::new(vec![]), Path::new("/dev/null"))
			.await;
		assert_eq!(result.outcome, ExitOutcome::Exited(0));
		assert_eq!(result.stdout, br#"{"code":0}"#);
		assert!(result.stderr.is_empty());
	}

	#[tokio::test]
	async fn test_passes_flags_then_input() {
		let command = stub(r#"printf '%s' "$*""#);
		let invocation = SolverInvocation::with_resources(vec!["-r".into(), "osrm".into()], 2, 3);
		let result = command.run(&invocation, Path::new("/tmp/req.json")).await;
		assert_eq!(
			String::from_utf8(result.stdout).unwrap(),
			"-r osrm -t 2 -x 3 -i /tmp/req.json"
		);
	}

	#[tokio::test]
	async fn test_collects_stderr_and_nonzero_exit() {
		let command = stub("echo 'first' >&2; echo 'second' >&2; exit 3");
		let result = command
			.run(&SolverInvocation::new(vec![]), Path::new("/dev/null"))
			.await;
		assert_eq!(result.outcome, ExitOutcome::Exited(3));
		assert_eq!(result.exit_code(), Some(3));
		assert_eq!(result.stderr, "first\nsecond\n");
	}

	#[tokio::test]
	async fn test_stderr_that_is_not_utf8() {
		let command = stub(
			r#"printf '\377 warn\n' >&2; sleep 0.3; echo 'more' >&2; printf 'tail' >&2; printf '{"code":0}'"#,
		);
		let result = command
			.run(&SolverInvocation::new(vec![]), Path::new("/dev/null"))
			.await;
		assert_eq!(result.outcome, ExitOutcome::Exited(0));
		assert_eq!(result.stdout, br#"{"code":0}"#);
		assert_eq!(result.stderr, "\u{FFFD} warn\nmore\ntail\n");
	}

	#[test]
	fn test_trim_line_ending() {
		assert_eq!(trim_line_ending(b"line\r\n"), b"line");
		assert_eq!(trim_line_ending(b"line\n"), b"line");
		assert_eq!(trim_line_ending(b"line"), b"line");
	}

	#[tokio::test]
	async fn test_missing_binary() {
		let command = SolverCommand::new("/nonexistent/solver-binary", vec![]);
		let result = command
			.run(&SolverInvocation::new(vec![]), Path::new("/dev/null"))
			.await;
		assert!(matches!(
			result.outcome,
			ExitOutcome::SpawnFailed { ref command, .. } if command == "/nonexistent/solver-binary"
		));
	}

	#[tokio::test]
	async fn test_killed_by_signal() {
		let command = stub("kill -9 $$");
		let result = command
			.run(&SolverInvocation::new(vec![]), Path::new("/dev/null"))
			.await;
		assert!(matches!(result.outcome, ExitOutcome::Terminated(_)));
		assert_eq!(result.exit_code(), None);
	}
}
