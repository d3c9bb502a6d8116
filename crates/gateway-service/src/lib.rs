//! HTTP front-end for the routing solver.
//!
//! This crate wires the pipeline from `gateway-runner` to an axum router,
//! parses the command line and runs the server.
//!
//! # Components
//!
//! - `api`: routes, handlers and shared request state
//! - `cli`: command-line arguments and their configuration overrides
//! - `service`: state construction and server lifecycle

pub mod api;
pub mod cli;
pub mod service;
