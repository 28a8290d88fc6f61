//! # inspector-core
//!
//! Foundation crate for the Inspector design-pattern analyzer.
//! Error taxonomy, layered configuration, tracing setup, and cooperative
//! cancellation shared by the analysis engine.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
