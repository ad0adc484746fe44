//! Core types and trait definitions for the Bookstock inventory suite.
//!
//! This crate is deliberately free of HTTP and I/O dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod inventory;
pub mod session;
pub mod sort;

pub use error::{Error, Result};
