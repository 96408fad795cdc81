//! Core shared library for EventCanon.
//!
//! Holds the pieces every other member crate leans on: process
//! configuration, the canonical error type and the tracing bootstrap.

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{CanonConfig, Environment, RuleToggle};
pub use errors::{ConfigError, EventCanonError, Result as CoreResult};
