//! Shape and size checks run before the solver is involved.

use gateway_config::SolverConfig;
use gateway_types::{RequestError, RoutingRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
	pub max_locations: usize,
	pub max_vehicles: usize,
}

impl RequestLimits {
	pub fn from_config(config: &SolverConfig) -> Self {
		Self {
			max_locations: config.max_locations,
			max_vehicles: config.max_vehicles,
		}
	}
}

/// Requires `vehicles` plus `jobs` or `shipments`, then enforces the
/// location limit before the vehicle limit.
pub fn validate(request: &RoutingRequest, limits: &RequestLimits) -> Result<(), RequestError> {
	let Some(vehicles) = request.vehicles() else {
		return Err(RequestError::MissingCollections);
	};
	if request.jobs().is_none() && request.shipments().is_none() {
		return Err(RequestError::MissingCollections);
	}

	let locations = request.location_count();
	if locations > limits.max_locations {
		return Err(RequestError::TooManyLocations {
			count: locations,
			max: limits.max_locations,
		});
	}

	if vehicles.len() > limits.max_vehicles {
		return Err(RequestError::TooManyVehicles {
			count: vehicles.len(),
			max: limits.max_vehicles,
		});
	}

	Ok(())
}
