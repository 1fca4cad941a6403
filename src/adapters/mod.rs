//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestTransport`] - upload transport using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockTransport`] - scripted response bodies and failures

pub mod mock;
pub mod reqwest_transport;

pub use mock::{MockBodySender, MockTransport, MockUpload};
pub use reqwest_transport::ReqwestTransport;
