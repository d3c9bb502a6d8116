use anyhow::{Context, Result};
use clap::Parser;
use gateway_config::GatewayConfig;
use gateway_monitoring::{init_tracing, TracingConfig};
use gateway_service::cli::{Args, Command};
use gateway_service::service::GatewayService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = args.load_config().context("Failed to load configuration")?;

	init_tracing(TracingConfig::for_service(
		&config.server.log_level,
		config.server.json_logs,
	))
	.map_err(|e| anyhow::anyhow!("{}", e))?;

	match &args.config {
		Some(path) => info!("Configuration loaded from {}", path.display()),
		None => info!("No configuration file given, using defaults"),
	}

	match args.command {
		Some(Command::Start) | None => start_service(config).await,
		Some(Command::Validate) => {
			validate_config(&config);
			Ok(())
		}
	}
}

async fn start_service(config: GatewayConfig) -> Result<()> {
	info!("Starting routing gateway");
	info!("Solver command: {}", config.solver.command);
	info!("Router: {}", config.solver.router);
	info!("Request files in: {}", config.server.log_dir.display());

	let service = GatewayService::new(config).context("Failed to build service")?;
	service.run().await
}

fn validate_config(config: &GatewayConfig) {
	info!("Configuration is valid");
	info!("Solver command: {}", config.solver.command);
	info!("Router: {}", config.solver.router);
	if let Some(profiles) = config.active_profiles() {
		for (profile, server) in profiles {
			info!("  {}: {}:{}", profile, server.host, server.port);
		}
	}
	info!(
		"Defaults: threads={} explore={} geometry={} plan_mode={} override={}",
		config.solver.threads,
		config.solver.explore,
		config.solver.geometry,
		config.solver.plan_mode,
		config.solver.allow_override
	);
}
