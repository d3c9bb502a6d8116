//! The routing problem submitted by a caller.

use crate::errors::RequestError;
use serde_json::{Map, Value};

/// A routing request as received over HTTP.
///
/// The body is kept as a raw JSON object: the solver reads it from disk and
/// understands far more keys than the gateway inspects, so nothing is
/// dropped or re-shaped on the way through.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingRequest {
	body: Map<String, Value>,
}

impl RoutingRequest {
	/// Parses raw request bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, RequestError> {
		let value: Value =
			serde_json::from_slice(bytes).map_err(|e| RequestError::Malformed(e.to_string()))?;
		Self::from_value(value)
	}

	pub fn from_value(value: Value) -> Result<Self, RequestError> {
		match value {
			Value::Object(body) => Ok(Self { body }),
			_ => Err(RequestError::MissingCollections),
		}
	}

	fn array(&self, key: &str) -> Option<&[Value]> {
		self.body
			.get(key)
			.and_then(Value::as_array)
			.map(Vec::as_slice)
	}

	pub fn vehicles(&self) -> Option<&[Value]> {
		self.array("vehicles")
	}

	pub fn jobs(&self) -> Option<&[Value]> {
		self.array("jobs")
	}

	pub fn shipments(&self) -> Option<&[Value]> {
		self.array("shipments")
	}

	/// Per-request solver overrides, when the `options` key holds an object.
	pub fn options(&self) -> Option<&Map<String, Value>> {
		self.body.get("options").and_then(Value::as_object)
	}

	/// Webhook target. Non-string values are treated as absent.
	pub fn callback_url(&self) -> Option<&str> {
		self.body.get("callbackUrl").and_then(Value::as_str)
	}

	/// Number of locations the solver has to route: one per job, two per
	/// shipment (pickup and delivery).
	pub fn location_count(&self) -> usize {
		let jobs = self.jobs().map_or(0, <[Value]>::len);
		let shipments = self.shipments().map_or(0, <[Value]>::len);
		jobs + 2 * shipments
	}

	pub fn identifiers(&self) -> Identifiers {
		Identifiers {
			route_id: self.body.get("routeId").cloned(),
			batch_id: self.body.get("batchId").cloned(),
		}
	}

	/// JSON encoding of the full body, as written for the solver.
	pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(&self.body)
	}
}

/// Caller-supplied identifiers echoed back with the solution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identifiers {
	pub route_id: Option<Value>,
	pub batch_id: Option<Value>,
}

impl Identifiers {
	pub fn is_empty(&self) -> bool {
		self.route_id.is_none() && self.batch_id.is_none()
	}

	/// Inserts `routeId` / `batchId` into `target` when it is a JSON object.
	pub fn merge_into(&self, target: &mut Value) {
		let Some(object) = target.as_object_mut() else {
			return;
		};
		if let Some(route_id) = &self.route_id {
			object.insert("routeId".to_string(), route_id.clone());
		}
		if let Some(batch_id) = &self.batch_id {
			object.insert("batchId".to_string(), batch_id.clone());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_location_count() {
		let request = RoutingRequest::from_value(json!({
			"vehicles": [{"id": 1}],
			"jobs": [{"id": 1}, {"id": 2}, {"id": 3}],
			"shipments": [{"amount": [1]}, {"amount": [2]}]
		}))
		.unwrap();
		assert_eq!(request.location_count(), 7);
	}

	#[test]
	fn test_non_array_collections_are_absent() {
		let request = RoutingRequest::from_value(json!({
			"vehicles": {"id": 1},
			"jobs": "none"
		}))
		.unwrap();
		assert!(request.vehicles().is_none());
		assert!(request.jobs().is_none());
		assert_eq!(request.location_count(), 0);
	}

	#[test]
	fn test_rejects_non_object() {
		assert_eq!(
			RoutingRequest::from_value(json!([1, 2])),
			Err(RequestError::MissingCollections)
		);
		assert!(matches!(
			RoutingRequest::from_slice(b"{not json"),
			Err(RequestError::Malformed(_))
		));
	}

	#[test]
	fn test_unknown_keys_survive_encoding() {
		let body = json!({
			"vehicles": [{"id": 1, "start": [2.35, 48.85]}],
			"jobs": [{"id": 7, "location": [2.29, 48.86]}],
			"matrices": {"car": {"durations": [[0, 5], [5, 0]]}},
			"options": {"g": true}
		});
		let request = RoutingRequest::from_value(body.clone()).unwrap();
		let encoded: Value = serde_json::from_slice(&request.to_bytes().unwrap()).unwrap();
		assert_eq!(encoded, body);
	}

	#[test]
	fn test_identifiers_merge() {
		let request = RoutingRequest::from_value(json!({
			"routeId": "r-17",
			"batchId": 4
		}))
		.unwrap();
		let ids = request.identifiers();
		assert!(!ids.is_empty());

		let mut solution = json!({"code": 0, "routes": []});
		ids.merge_into(&mut solution);
		assert_eq!(solution["routeId"], "r-17");
		assert_eq!(solution["batchId"], 4);

		let mut not_an_object = json!([1]);
		ids.merge_into(&mut not_an_object);
		assert_eq!(not_an_object, json!([1]));
	}

	#[test]
	fn test_callback_url_must_be_string() {
		let request = RoutingRequest::from_value(json!({"callbackUrl": 12})).unwrap();
		assert_eq!(request.callback_url(), None);

		let request =
			RoutingRequest::from_value(json!({"callbackUrl": "http://hooks.local/done"})).unwrap();
		assert_eq!(request.callback_url(), Some("http://hooks.local/done"));
	}
}
