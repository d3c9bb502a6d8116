//! Webhook delivery of solver results.
//!
//! When a caller supplies a `callbackUrl`, the gateway acknowledges the
//! request immediately and later POSTs the final JSON to that URL through a
//! [`CallbackSink`]. Deliveries are attempted once.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Header carrying the HTTP status the result would have had on a direct
/// response.
pub const STATUS_HEADER: &str = "X-Solver-Status";

#[derive(Error, Debug)]
pub enum DeliveryError {
	#[error("Callback request to {url} failed: {source}")]
	Request {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("Callback {url} answered with status {status}")]
	Rejected { url: String, status: u16 },
}

/// Destination for asynchronously produced results.
#[async_trait]
pub trait CallbackSink: Send + Sync {
	async fn deliver(&self, url: &str, status: u16, body: &Value) -> Result<(), DeliveryError>;
}

/// Posts results as JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCallback {
	client: reqwest::Client,
}

impl HttpCallback {
	pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self { client })
	}
}

#[async_trait]
impl CallbackSink for HttpCallback {
	async fn deliver(&self, url: &str, status: u16, body: &Value) -> Result<(), DeliveryError> {
		debug!("Posting solver result to {}", url);

		let response = self
			.client
			.post(url)
			.header(STATUS_HEADER, status.to_string())
			.json(body)
			.send()
			.await
			.map_err(|source| DeliveryError::Request {
				url: url.to_string(),
				source,
			})?;

		let code = response.status();
		if !code.is_success() {
			return Err(DeliveryError::Rejected {
				url: url.to_string(),
				status: code.as_u16(),
			});
		}

		info!("Delivered solver result to {} ({})", url, code);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{body_json, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn callback() -> HttpCallback {
		HttpCallback::new(Duration::from_secs(5)).unwrap()
	}

	#[tokio::test]
	async fn test_posts_body_and_status() {
		let server = MockServer::start().await;
		let body = json!({"code": 0, "routes": [], "routeId": "r-9"});

		Mock::given(method("POST"))
			.and(path("/hooks/solved"))
			.and(header(STATUS_HEADER, "200"))
			.and(body_json(&body))
			.respond_with(ResponseTemplate::new(204))
			.expect(1)
			.mount(&server)
			.await;

		let url = format!("{}/hooks/solved", server.uri());
		callback().deliver(&url, 200, &body).await.unwrap();
	}

	#[tokio::test]
	async fn test_rejected_by_receiver() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		let err = callback()
			.deliver(&server.uri(), 500, &json!({"code": 1}))
			.await
			.unwrap_err();
		assert!(matches!(err, DeliveryError::Rejected { status: 503, .. }));
	}

	#[tokio::test]
	async fn test_unreachable_receiver() {
		let err = callback()
			.deliver("not a url", 200, &json!({}))
			.await
			.unwrap_err();
		assert!(matches!(err, DeliveryError::Request { .. }));
	}
}
