use std::sync::Arc;

use receipt_points::receipts::points::{breakdown, PointsRule};
use receipt_points::receipts::{
    InMemoryReceiptRepository, Item, ReceiptId, ReceiptRepository, ReceiptService,
    ReceiptServiceError, ReceiptSubmission, RepositoryError,
};

fn target_receipt() -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        total: "35.35".to_string(),
        items: vec![
            Item::new("Mountain Dew 12PK", "6.49"),
            Item::new("Emils Cheese Pizza", "12.25"),
            Item::new("Knorr Creamy Chicken", "1.26"),
            Item::new("Doritos Nacho Cheese", "3.35"),
            Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
    }
}

#[test]
fn reference_receipt_breaks_down_into_28_points() {
    let receipt = target_receipt();
    let result = breakdown(
        &receipt.retailer,
        &receipt.purchase_date,
        &receipt.purchase_time,
        &receipt.total,
        &receipt.items,
    )
    .expect("reference receipt scores");

    assert_eq!(result.total, 28);
    assert_eq!(result.points_for(PointsRule::RetailerName), 6);
    assert_eq!(result.points_for(PointsRule::ItemPairs), 10);
    assert_eq!(result.points_for(PointsRule::ItemDescriptionLength), 6);
    assert_eq!(result.points_for(PointsRule::OddPurchaseDay), 6);
    assert_eq!(result.points_for(PointsRule::RoundDollarTotal), 0);
    assert_eq!(result.points_for(PointsRule::AfternoonWindow), 0);
}

#[test]
fn round_total_earns_both_total_bonuses() {
    let mut receipt = target_receipt();
    receipt.total = "35.00".to_string();

    let result = breakdown(
        &receipt.retailer,
        &receipt.purchase_date,
        &receipt.purchase_time,
        &receipt.total,
        &receipt.items,
    )
    .expect("round total scores");

    assert_eq!(result.points_for(PointsRule::RoundDollarTotal), 50);
    assert_eq!(result.points_for(PointsRule::QuarterMultipleTotal), 25);
    assert_eq!(result.total, 28 + 75);
}

#[test]
fn receipts_are_processed_looked_up_and_deleted() {
    let repository = Arc::new(InMemoryReceiptRepository::default());
    let service = ReceiptService::new(repository.clone());

    let receipt = service.process(target_receipt()).expect("receipt processed");
    assert_eq!(service.points(&receipt.id).expect("points available"), 28);
    assert_eq!(repository.count().expect("count readable"), 1);

    service.delete(&receipt.id).expect("receipt deleted");
    assert!(matches!(
        service.points(&receipt.id),
        Err(ReceiptServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn lookup_of_unknown_id_never_reports_zero() {
    let service = ReceiptService::new(Arc::new(InMemoryReceiptRepository::default()));

    let result = service.points(&ReceiptId::from("7fb1377b-b223-49d9-a31a-5a02701dd310"));

    assert!(result.is_err());
}
