//! Positivation analytics: product adoption metrics for sales campaigns.
//!
//! The [`analytics`] module holds the engine. Everything it computes is derived from a
//! [`analytics::Snapshot`] handed in by the caller; the remaining modules carry the
//! configuration, error and tracing plumbing shared with the API service.

pub mod analytics;
pub mod config;
pub mod error;
pub mod telemetry;
