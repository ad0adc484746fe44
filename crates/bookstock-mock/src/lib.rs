//! In-process fixture backend for Bookstock.
//!
//! [`Dataset`] holds the in-memory tables a real backend would persist,
//! seeded with canned fixtures; [`MockGateway`] exposes it through the
//! [`bookstock_core::gateway::Gateway`] trait so development and tests can
//! swap it in for the HTTP client by configuration alone.

mod data;
mod dataset;
mod gateway;

pub mod error;

pub use dataset::{Dataset, DevUser};
pub use error::{Error, Result};
pub use gateway::MockGateway;
