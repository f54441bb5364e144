use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId, ReceiptSubmission};
use crate::receipts::repository::{
    InMemoryReceiptRepository, ReceiptRepository, RepositoryError,
};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn mountain_dew_items() -> Vec<Item> {
    vec![
        Item::new("Mountain Dew 12PK", "6.49"),
        Item::new("Emils Cheese Pizza", "12.25"),
        Item::new("Knorr Creamy Chicken", "1.26"),
        Item::new("Doritos Nacho Cheese", "3.35"),
        Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
    ]
}

pub(super) fn gatorade_items() -> Vec<Item> {
    vec![Item::new("Gatorade", "2.25"); 4]
}

/// Reference receipt worth 28 points.
pub(super) fn target_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        total: "35.35".to_string(),
        items: mountain_dew_items(),
    }
}

/// Reference receipt worth 109 points.
pub(super) fn corner_market_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        total: "9.00".to_string(),
        items: gatorade_items(),
    }
}

/// Single item receipt worth 31 points.
pub(super) fn pepsi_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "13:13".to_string(),
        total: "1.25".to_string(),
        items: vec![Item::new("Pepsi - 12-oz", "1.25")],
    }
}

pub(super) fn build_service() -> (
    ReceiptService<InMemoryReceiptRepository>,
    Arc<InMemoryReceiptRepository>,
) {
    let repository = Arc::new(InMemoryReceiptRepository::default());
    (ReceiptService::new(repository.clone()), repository)
}

pub(super) fn router_with_service(
    service: ReceiptService<InMemoryReceiptRepository>,
) -> axum::Router {
    receipt_router(service)
}

pub(super) struct UnavailableRepository;

impl ReceiptRepository for UnavailableRepository {
    fn insert(&self, _receipt: Receipt) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn get(&self, _id: &ReceiptId) -> Result<Receipt, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn delete(&self, _id: &ReceiptId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
