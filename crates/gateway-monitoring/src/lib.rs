//! Logging and health reporting for the gateway.

pub mod health;
pub mod tracing;

pub use health::{HealthCheck, HealthCheckResult, HealthChecker, HealthReport, HealthStatus};
pub use self::tracing::{init_tracing, TracingConfig};
