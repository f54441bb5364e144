use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Receipt, ReceiptId, ReceiptSubmission};
use super::points::{self, PointsBreakdown, PointsError};
use super::repository::{ReceiptRepository, RepositoryError};
use super::validation::{validate_submission, FieldErrors};

/// Service composing validation, the points aggregator, and the receipt store.
pub struct ReceiptService<R> {
    repository: Arc<R>,
}

impl<R> Clone for ReceiptService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> ReceiptService<R>
where
    R: ReceiptRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validate, score, and store a submission, returning the stored receipt.
    pub fn process(&self, submission: ReceiptSubmission) -> Result<Receipt, ReceiptServiceError> {
        let scored = score_submission(&submission)?;
        let id = ReceiptId::generate();

        info!(receipt_id = %id, points = scored.total, "calculated receipt points");

        let receipt = Receipt::from_submission(id, submission, scored.total);
        self.repository.insert(receipt.clone())?;

        debug!(
            receipt_id = %receipt.id,
            stored = self.repository.count().unwrap_or_default(),
            "receipt stored"
        );
        Ok(receipt)
    }

    pub fn get(&self, id: &ReceiptId) -> Result<Receipt, ReceiptServiceError> {
        Ok(self.repository.get(id)?)
    }

    /// Points computed when the receipt was processed.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        self.get(id).map(|receipt| receipt.points)
    }

    pub fn delete(&self, id: &ReceiptId) -> Result<(), ReceiptServiceError> {
        self.repository.delete(id)?;
        info!(receipt_id = %id, "receipt deleted");
        Ok(())
    }
}

/// Validates a submission and returns its per-rule breakdown without storing anything.
pub fn score_submission(
    submission: &ReceiptSubmission,
) -> Result<PointsBreakdown, ReceiptServiceError> {
    validate_submission(submission)?;

    let breakdown = points::breakdown(
        &submission.retailer,
        &submission.purchase_date,
        &submission.purchase_time,
        &submission.total,
        &submission.items,
    )?;
    Ok(breakdown)
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] FieldErrors),
    #[error(transparent)]
    Points(#[from] PointsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
