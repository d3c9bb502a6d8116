//! Request-to-solver execution pipeline.
//!
//! A routing request flows through five stages:
//!
//! - [`validator`]: shape and size checks, before anything touches disk
//! - [`options`]: configuration and per-request overrides become solver flags
//! - [`request_file`]: the request is written to a uniquely named file
//! - [`process`]: the solver runs on that file and its output is collected
//! - [`mapper`]: exit code and output become an HTTP status and JSON body
//!
//! The request file is removed once the solver has exited, whatever the
//! outcome. [`health`] reuses the same machinery for the liveness probe.

pub mod errors;
pub mod health;
pub mod mapper;
pub mod options;
pub mod process;
pub mod request_file;
pub mod validator;

use gateway_config::GatewayConfig;
use gateway_types::{RequestError, ResponseEnvelope, RoutingRequest, SolverInvocation, SolverResult};
use std::path::{Path, PathBuf};
use tracing::{error, field, info, instrument, Span};

pub use errors::RunnerError;
pub use health::SolverHealthCheck;
pub use options::{OptionTranslator, StaticFlags};
pub use process::SolverCommand;
pub use request_file::RequestFile;
pub use validator::RequestLimits;

/// Everything needed to serve a routing request, built once from
/// configuration and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct SolverPipeline {
	limits: RequestLimits,
	translator: OptionTranslator,
	command: SolverCommand,
	work_dir: PathBuf,
}

impl SolverPipeline {
	pub fn from_config(config: &GatewayConfig) -> Self {
		let pipeline = Self {
			limits: RequestLimits::from_config(&config.solver),
			translator: OptionTranslator::from_config(config),
			command: SolverCommand::from_config(&config.solver),
			work_dir: config.server.log_dir.clone(),
		};
		info!(
			"Solver pipeline ready: {} {}",
			pipeline.command.program(),
			pipeline.translator.static_flags().flags().join(" ")
		);
		pipeline
	}

	pub fn command(&self) -> &SolverCommand {
		&self.command
	}

	pub fn work_dir(&self) -> &Path {
		&self.work_dir
	}

	pub fn validate(&self, request: &RoutingRequest) -> Result<(), RequestError> {
		validator::validate(request, &self.limits)
	}

	/// Runs the solver for an already validated request and builds the
	/// response, with `routeId` / `batchId` merged in.
	#[instrument(skip_all, fields(file = field::Empty))]
	pub async fn solve(&self, request: &RoutingRequest) -> ResponseEnvelope {
		let invocation = self.translator.translate(request.options());

		let envelope = match self.execute(request, &invocation).await {
			Ok(result) => mapper::map_result(result),
			Err(e) => {
				error!("Solver was not started: {}", e);
				ResponseEnvelope::internal_error()
			}
		};

		envelope.with_identifiers(&request.identifiers())
	}

	async fn execute(
		&self,
		request: &RoutingRequest,
		invocation: &SolverInvocation,
	) -> Result<SolverResult, RunnerError> {
		let contents = request.to_bytes()?;
		let file = RequestFile::create(&self.work_dir, &contents).await?;
		if let Some(name) = file.path().file_name() {
			Span::current().record("file", field::display(name.to_string_lossy()));
		}
		let result = self.command.run(invocation, file.path()).await;
		file.reap().await;
		Ok(result)
	}
}
