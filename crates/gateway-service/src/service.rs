//! Service construction and lifecycle.

use crate::api::{self, AppState};
use anyhow::{Context, Result};
use axum::Router;
use gateway_config::GatewayConfig;
use gateway_delivery::HttpCallback;
use gateway_monitoring::HealthChecker;
use gateway_runner::{SolverHealthCheck, SolverPipeline};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// Builds the shared handler state from configuration.
pub fn build_state(config: &GatewayConfig) -> Result<AppState> {
	let pipeline = SolverPipeline::from_config(config);

	let mut health = HealthChecker::new();
	health.register_check(Box::new(SolverHealthCheck::new(
		pipeline.command().clone(),
		pipeline.work_dir().to_path_buf(),
	)));

	let callbacks = HttpCallback::new(Duration::from_secs(config.callback.timeout_secs))
		.context("Failed to build callback HTTP client")?;

	Ok(AppState {
		pipeline: Arc::new(pipeline),
		callbacks: Arc::new(callbacks),
		health: Arc::new(health),
	})
}

pub struct GatewayService {
	config: GatewayConfig,
	state: AppState,
}

impl GatewayService {
	pub fn new(config: GatewayConfig) -> Result<Self> {
		let state = build_state(&config)?;
		Ok(Self { config, state })
	}

	pub fn router(&self) -> Router {
		api::router(self.state.clone(), &self.config.server)
	}

	/// Serves until Ctrl+C or SIGTERM.
	pub async fn run(self) -> Result<()> {
		let server = &self.config.server;
		let address = format!("{}:{}", server.host, server.port);
		let listener = tokio::net::TcpListener::bind(&address)
			.await
			.with_context(|| format!("Failed to bind {}", address))?;

		info!(
			"Routing gateway listening on {} (base path {})",
			address, server.base_url
		);

		axum::serve(listener, self.router())
			.with_graceful_shutdown(shutdown_signal())
			.await
			.context("HTTP server error")?;

		info!("Routing gateway stopped");
		Ok(())
	}
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(e) = signal::ctrl_c().await {
			error!("Failed to listen for Ctrl+C: {}", e);
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(e) => {
				error!("Failed to install SIGTERM handler: {}", e);
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received");
}
