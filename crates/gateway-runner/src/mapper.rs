//! Turns a finished solver run into the response sent to the caller.

use gateway_types::{ErrorCode, ExitOutcome, ResponseEnvelope, SolverResult};
use serde_json::Value;
use tracing::warn;

/// Maps a solver run to an HTTP status and JSON body.
///
/// | exit | status | body |
/// |------|--------|------|
/// | 0, 2, 3 | 200, 400, 500 | solver stdout |
/// | 1 | 500 | `{"code":1,"error":...}` |
/// | other, signal | 500 | `{"code":1,"error":"Internal error"}` |
/// | spawn failure | 500 | `{"code":1,"error":"Unfound command: ..."}` |
pub fn map_result(result: SolverResult) -> ResponseEnvelope {
	let SolverResult {
		outcome, stdout, ..
	} = result;

	match outcome {
		ExitOutcome::SpawnFailed { command, .. } => {
			ResponseEnvelope::error(ErrorCode::Internal, format!("Unfound command: {}", command))
		}
		ExitOutcome::Terminated(reason) => {
			warn!("Solver did not exit normally: {}", reason);
			ResponseEnvelope::internal_error()
		}
		ExitOutcome::Exited(code) => match ErrorCode::from_exit_code(code) {
			Some(ErrorCode::Internal) => internal_failure(&stdout),
			Some(code) => match serde_json::from_slice::<Value>(&stdout) {
				Ok(body) => ResponseEnvelope::new(code.http_status(), body),
				Err(e) => {
					warn!("Solver output is not valid JSON: {}", e);
					ResponseEnvelope::internal_error()
				}
			},
			None => {
				warn!("Solver exited with unexpected code {}", code);
				ResponseEnvelope::internal_error()
			}
		},
	}
}

/// Internal-error body for exit code 1. Only the solver's `error` message is
/// kept from stdout; the code is always 1.
fn internal_failure(stdout: &[u8]) -> ResponseEnvelope {
	let message = serde_json::from_slice::<Value>(stdout)
		.ok()
		.and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned));

	match message {
		Some(message) => ResponseEnvelope::error(ErrorCode::Internal, message),
		None => ResponseEnvelope::internal_error(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn exited(code: i32, stdout: &str) -> SolverResult {
		SolverResult {
			outcome: ExitOutcome::Exited(code),
			stdout: stdout.as_bytes().to_vec(),
			stderr: String::new(),
		}
	}

	#[test]
	fn test_success_passes_output_through() {
		let envelope = map_result(exited(0, r#"{"code":0,"summary":{"cost":12}}"#));
		assert_eq!(envelope.status, 200);
		assert_eq!(envelope.body, json!({"code": 0, "summary": {"cost": 12}}));
	}

	#[test]
	fn test_input_and_routing_errors() {
		let input = map_result(exited(2, r#"{"code":2,"error":"Invalid profile: bike."}"#));
		assert_eq!(input.status, 400);
		assert_eq!(input.body["error"], "Invalid profile: bike.");

		let routing = map_result(exited(3, r#"{"code":3,"error":"Unfound route(s)."}"#));
		assert_eq!(routing.status, 500);
		assert_eq!(routing.body["code"], 3);
	}

	#[test]
	fn test_internal_exit_always_carries_internal_code() {
		let envelope = map_result(exited(1, r#"{"code":0,"routes":[1,2,3]}"#));
		assert_eq!(envelope.status, 500);
		assert_eq!(envelope.body, json!({"code": 1, "error": "Internal error"}));

		let envelope = map_result(exited(1, r#"{"code":1,"error":"Out of memory"}"#));
		assert_eq!(envelope.body, json!({"code": 1, "error": "Out of memory"}));

		let envelope = map_result(exited(1, "partial outp"));
		assert_eq!(envelope.body["code"], 1);
	}

	#[test]
	fn test_unknown_exit_code_discards_output() {
		let envelope = map_result(exited(42, r#"{"code":0}"#));
		assert_eq!(envelope.status, 500);
		assert_eq!(envelope.body, json!({"code": 1, "error": "Internal error"}));
	}

	#[test]
	fn test_unparseable_output() {
		let envelope = map_result(exited(0, "{\"code\":0,\"rou"));
		assert_eq!(envelope.status, 500);
		assert_eq!(envelope.body["code"], 1);
	}

	#[test]
	fn test_spawn_failure() {
		let envelope = map_result(SolverResult::spawn_failed("vroom", "No such file"));
		assert_eq!(envelope.status, 500);
		assert_eq!(
			envelope.body,
			json!({"code": 1, "error": "Unfound command: vroom"})
		);
	}

	#[test]
	fn test_terminated() {
		let envelope = map_result(SolverResult {
			outcome: ExitOutcome::Terminated("signal: 9".to_string()),
			stdout: b"{}".to_vec(),
			stderr: String::new(),
		});
		assert_eq!(envelope.status, 500);
		assert_eq!(envelope.body["error"], "Internal error");
	}
}
