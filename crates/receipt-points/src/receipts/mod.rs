//! Receipt intake, points scoring, and lookup.
//!
//! A submission flows through [`validation`] into the [`points`] aggregator, is stamped with a
//! fresh [`ReceiptId`], and lands in a [`ReceiptRepository`]. The [`router`] exposes the
//! service over HTTP.

pub mod domain;
pub mod points;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Receipt, ReceiptId, ReceiptSubmission};
pub use points::{PointsBreakdown, PointsError, PointsRule, RuleContribution};
pub use repository::{InMemoryReceiptRepository, ReceiptRepository, RepositoryError};
pub use router::receipt_router;
pub use service::{score_submission, ReceiptService, ReceiptServiceError};
pub use validation::{validate_submission, FieldErrors};
