//! Shared data model for the routing gateway.
//!
//! Every crate in the workspace speaks in terms of these types:
//!
//! - [`RoutingRequest`]: the caller's JSON payload, kept as a raw object so
//!   that unknown fields reach the solver untouched
//! - [`SolverInvocation`]: the flag list for one solver run
//! - [`SolverResult`]: what came back from the solver process
//! - [`ResponseEnvelope`]: the HTTP status and JSON body sent to the caller
//! - [`ErrorCode`]: numeric codes shared with the solver's own output

pub mod codes;
pub mod errors;
pub mod invocation;
pub mod request;
pub mod response;
pub mod result;

pub use codes::ErrorCode;
pub use errors::RequestError;
pub use invocation::SolverInvocation;
pub use request::{Identifiers, RoutingRequest};
pub use response::ResponseEnvelope;
pub use result::{ExitOutcome, SolverResult};
