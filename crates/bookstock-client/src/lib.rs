//! HTTP backend for Bookstock.
//!
//! [`HttpGateway`] implements the [`bookstock_core::gateway::Gateway`] trait
//! over a REST backend, with a per-request timeout and a bounded retry for
//! transient (5xx) failures.

mod client;

pub mod error;

pub use client::{HttpConfig, HttpGateway};
pub use error::ApiError;
