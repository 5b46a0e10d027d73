//! # API Shared
//!
//! Shared definitions for the triage HTTP API.
//!
//! Contains:
//! - JSON wire models (`wire` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the workspace runner.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
