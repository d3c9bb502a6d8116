//! HTTP routes for solving and health probing.

use axum::{
	body::Bytes,
	extract::{DefaultBodyLimit, State},
	http::StatusCode,
	response::{IntoResponse, Json, Response},
	routing::{get, post},
	Router,
};
use gateway_config::ServerConfig;
use gateway_delivery::CallbackSink;
use gateway_monitoring::HealthChecker;
use gateway_runner::SolverPipeline;
use gateway_types::{ResponseEnvelope, RoutingRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// State shared by every handler. All of it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
	pub pipeline: Arc<SolverPipeline>,
	pub callbacks: Arc<dyn CallbackSink>,
	pub health: Arc<HealthChecker>,
}

/// Mounts `POST <base>` and `GET <base>/health`.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
	let root = server.base_url.trim_end_matches('/');

	let mut app = Router::new()
		.route(&format!("{}/", root), post(solve))
		.route(&format!("{}/health", root), get(health));
	if !root.is_empty() {
		app = app.route(root, post(solve));
	}

	app.with_state(state)
		.layer(DefaultBodyLimit::max(server.max_body_bytes))
		.layer(TimeoutLayer::new(Duration::from_secs(
			server.request_timeout_secs,
		)))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Adapts a [`ResponseEnvelope`] to an axum response.
pub struct EnvelopeResponse(pub ResponseEnvelope);

impl IntoResponse for EnvelopeResponse {
	fn into_response(self) -> Response {
		let status =
			StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		(status, Json(self.0.body)).into_response()
	}
}

async fn solve(State(state): State<AppState>, body: Bytes) -> Response {
	let request = match RoutingRequest::from_slice(&body).and_then(|request| {
		state.pipeline.validate(&request)?;
		Ok(request)
	}) {
		Ok(request) => request,
		Err(e) => {
			info!("Rejected routing request: {}", e);
			return EnvelopeResponse(ResponseEnvelope::from(&e)).into_response();
		}
	};

	match request.callback_url().map(str::to_owned) {
		Some(url) => accept_for_callback(state, request, url),
		None => solve_now(state, request).await,
	}
}

/// Runs the pipeline in its own task so that a dropped connection or a
/// request timeout cannot interrupt it before the request file is reaped.
async fn solve_now(state: AppState, request: RoutingRequest) -> Response {
	let pipeline = state.pipeline.clone();
	let envelope = match tokio::spawn(async move { pipeline.solve(&request).await }).await {
		Ok(envelope) => envelope,
		Err(e) => {
			error!("Solver task failed: {}", e);
			ResponseEnvelope::internal_error()
		}
	};
	EnvelopeResponse(envelope).into_response()
}

fn accept_for_callback(state: AppState, request: RoutingRequest, url: String) -> Response {
	let mut ack = json!({
		"code": 0,
		"message": "Request accepted",
	});
	request.identifiers().merge_into(&mut ack);

	tokio::spawn(async move {
		let envelope = state.pipeline.solve(&request).await;
		if let Err(e) = state
			.callbacks
			.deliver(&url, envelope.status, &envelope.body)
			.await
		{
			warn!("Callback delivery failed: {}", e);
		}
	});

	(StatusCode::ACCEPTED, Json(ack)).into_response()
}

async fn health(State(state): State<AppState>) -> Response {
	let report = state.health.run_all_checks().await;
	if report.status.is_healthy() {
		(StatusCode::OK, "OK").into_response()
	} else {
		(StatusCode::INTERNAL_SERVER_ERROR, report.failures()).into_response()
	}
}
