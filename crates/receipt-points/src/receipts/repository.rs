use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{Receipt, ReceiptId};

/// Storage abstraction so the service can be exercised against any backing store.
pub trait ReceiptRepository: Send + Sync {
    /// Stores the receipt under its id, replacing any receipt with the same id.
    fn insert(&self, receipt: Receipt) -> Result<(), RepositoryError>;
    fn get(&self, id: &ReceiptId) -> Result<Receipt, RepositoryError>;
    fn delete(&self, id: &ReceiptId) -> Result<(), RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("receipt not found")]
    NotFound,
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local receipt store. Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReceiptRepository {
    receipts: Arc<RwLock<HashMap<ReceiptId, Receipt>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("receipt store lock poisoned".to_string())
}

impl ReceiptRepository for InMemoryReceiptRepository {
    fn insert(&self, receipt: Receipt) -> Result<(), RepositoryError> {
        let mut guard = self.receipts.write().map_err(poisoned)?;
        guard.insert(receipt.id.clone(), receipt);
        Ok(())
    }

    fn get(&self, id: &ReceiptId) -> Result<Receipt, RepositoryError> {
        let guard = self.receipts.read().map_err(poisoned)?;
        guard.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn delete(&self, id: &ReceiptId) -> Result<(), RepositoryError> {
        let mut guard = self.receipts.write().map_err(poisoned)?;
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let guard = self.receipts.read().map_err(poisoned)?;
        Ok(guard.len())
    }
}
