use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::domain::{Item, ReceiptSubmission};
use super::points::{parse_amount, parse_purchase_date, parse_purchase_time};

pub const BLANK_MESSAGE: &str = "This field cannot be blank";
pub const EMPTY_ITEMS_MESSAGE: &str = "This field must have at least one object";
pub const INVALID_NUMBER_MESSAGE: &str = "This field must be a valid number";
pub const INVALID_DATE_MESSAGE: &str = "This field must be a valid date";
pub const INVALID_TIME_MESSAGE: &str = "This field must be a valid time";

pub const RETAILER_FIELD: &str = "retailerName";
pub const PURCHASE_DATE_FIELD: &str = "purchaseDate";
pub const PURCHASE_TIME_FIELD: &str = "purchaseTime";
pub const TOTAL_FIELD: &str = "total";
pub const ITEMS_FIELD: &str = "items";

/// Field name to message map collected while validating one submission.
///
/// The first message recorded for a field is kept; later failures for the same field are
/// ignored. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add_field_error(&mut self, key: &str, message: &str) {
        self.0
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, message)| (key.as_str(), message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(key, message)| format!("{key}: {message}"))
            .collect();
        write!(f, "invalid receipt ({})", rendered.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn items_not_empty(items: &[Item]) -> bool {
    !items.is_empty()
}

pub fn valid_date(value: &str) -> bool {
    parse_purchase_date(value).is_some()
}

pub fn valid_time(value: &str) -> bool {
    parse_purchase_time(value).is_some()
}

pub fn valid_number(value: &str) -> bool {
    parse_amount(value).is_some()
}

/// Checks a submission before it is scored. Returns every failing field with its first
/// failing message.
pub fn validate_submission(submission: &ReceiptSubmission) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    errors.check_field(not_blank(&submission.retailer), RETAILER_FIELD, BLANK_MESSAGE);

    errors.check_field(
        not_blank(&submission.purchase_date),
        PURCHASE_DATE_FIELD,
        BLANK_MESSAGE,
    );
    errors.check_field(
        valid_date(&submission.purchase_date),
        PURCHASE_DATE_FIELD,
        INVALID_DATE_MESSAGE,
    );

    errors.check_field(
        not_blank(&submission.purchase_time),
        PURCHASE_TIME_FIELD,
        BLANK_MESSAGE,
    );
    errors.check_field(
        valid_time(&submission.purchase_time),
        PURCHASE_TIME_FIELD,
        INVALID_TIME_MESSAGE,
    );

    errors.check_field(not_blank(&submission.total), TOTAL_FIELD, BLANK_MESSAGE);
    errors.check_field(
        valid_number(&submission.total),
        TOTAL_FIELD,
        INVALID_NUMBER_MESSAGE,
    );

    errors.check_field(
        items_not_empty(&submission.items),
        ITEMS_FIELD,
        EMPTY_ITEMS_MESSAGE,
    );

    if errors.is_valid() {
        Ok(())
    } else {
        Err(errors)
    }
}
