//! Numeric error codes and their HTTP status mapping.

/// Codes carried in the `code` field of every JSON body the gateway returns.
///
/// `0` to `3` double as the solver's process exit codes. `TooLarge` is only
/// ever produced by the gateway itself when a request exceeds size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	Ok,
	Internal,
	Input,
	Routing,
	TooLarge,
}

impl ErrorCode {
	pub fn as_i32(self) -> i32 {
		match self {
			ErrorCode::Ok => 0,
			ErrorCode::Internal => 1,
			ErrorCode::Input => 2,
			ErrorCode::Routing => 3,
			ErrorCode::TooLarge => 4,
		}
	}

	/// Interprets a solver exit code. Returns `None` for codes the solver is
	/// not known to use.
	pub fn from_exit_code(code: i32) -> Option<Self> {
		match code {
			0 => Some(ErrorCode::Ok),
			1 => Some(ErrorCode::Internal),
			2 => Some(ErrorCode::Input),
			3 => Some(ErrorCode::Routing),
			_ => None,
		}
	}

	pub fn http_status(self) -> u16 {
		match self {
			ErrorCode::Ok => 200,
			ErrorCode::Internal => 500,
			ErrorCode::Input => 400,
			ErrorCode::Routing => 500,
			ErrorCode::TooLarge => 413,
		}
	}
}
