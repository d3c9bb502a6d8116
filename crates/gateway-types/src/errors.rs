//! Error types for request validation.

use crate::codes::ErrorCode;
use thiserror::Error;

/// Reasons a routing request is rejected before the solver is started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
	/// The body is not parseable JSON.
	#[error("{0}")]
	Malformed(String),

	#[error("Invalid JSON object in request, please add jobs or shipments and vehicles to the object body")]
	MissingCollections,

	#[error("Too many locations ({count}) in query, maximum is set to {max}")]
	TooManyLocations { count: usize, max: usize },

	#[error("Too many vehicles ({count}) in query, maximum is set to {max}")]
	TooManyVehicles { count: usize, max: usize },
}

impl RequestError {
	pub fn code(&self) -> ErrorCode {
		match self {
			RequestError::Malformed(_) | RequestError::MissingCollections => ErrorCode::Input,
			RequestError::TooManyLocations { .. } | RequestError::TooManyVehicles { .. } => {
				ErrorCode::TooLarge
			}
		}
	}
}
