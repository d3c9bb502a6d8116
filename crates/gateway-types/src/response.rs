//! Status and body returned to the caller.

use crate::codes::ErrorCode;
use crate::errors::RequestError;
use crate::request::Identifiers;
use serde_json::{json, Value};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
	pub status: u16,
	pub body: Value,
}

impl ResponseEnvelope {
	pub fn new(status: u16, body: Value) -> Self {
		Self { status, body }
	}

	/// `{"code": <code>, "error": <message>}` with the status for `code`.
	pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			status: code.http_status(),
			body: json!({
				"code": code.as_i32(),
				"error": message.into(),
			}),
		}
	}

	pub fn internal_error() -> Self {
		Self::error(ErrorCode::Internal, INTERNAL_ERROR_MESSAGE)
	}

	pub fn with_identifiers(mut self, identifiers: &Identifiers) -> Self {
		identifiers.merge_into(&mut self.body);
		self
	}
}

impl From<&RequestError> for ResponseEnvelope {
	fn from(error: &RequestError) -> Self {
		Self::error(error.code(), error.to_string())
	}
}
