//! analyst - upload a document for analysis and follow the service's progress stream.
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod session;
pub mod sse;
pub mod terminal;
pub mod traits;
pub mod ui;
