//! Receipt intake and loyalty points scoring.
//!
//! The [`receipts`] module owns the scoring rules, validation, storage abstraction, and the
//! HTTP router. Configuration and telemetry bootstrap live alongside so the API binary stays
//! a thin orchestration layer.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
