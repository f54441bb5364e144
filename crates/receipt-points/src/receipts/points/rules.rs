use chrono::{Datelike, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::super::domain::Item;
use super::parsing::{parse_amount, parse_purchase_date, parse_purchase_time};
use super::{PointsError, PointsRule};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_WINDOW_POINTS: u64 = 10;

/// Reserved bonus for totals above ten dollars. Permanently switched off.
const FIXED_CONDITION_ENABLED: bool = false;
const FIXED_CONDITION_POINTS: u64 = 5;
const FIXED_CONDITION_THRESHOLD: Decimal = Decimal::TEN;

/// One point per ASCII letter or digit in the retailer name.
pub(crate) fn retailer_name_points(retailer: &str) -> u64 {
    retailer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as u64
}

pub(crate) fn round_dollar_points(total: Decimal) -> u64 {
    if total % Decimal::ONE == Decimal::ZERO {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

pub(crate) fn quarter_multiple_points(total: Decimal) -> u64 {
    if total % Decimal::new(25, 2) == Decimal::ZERO {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

pub(crate) fn item_pair_points(items: &[Item]) -> u64 {
    (items.len() / 2) as u64 * ITEM_PAIR_POINTS
}

/// Items whose trimmed description length is a multiple of three earn `ceil(price * 0.2)`.
/// A price that does not parse, or is negative, earns nothing.
pub(crate) fn item_description_points(items: &[Item]) -> Result<u64, PointsError> {
    let multiplier = Decimal::new(2, 1);
    let overflow = PointsError::Overflow {
        rule: PointsRule::ItemDescriptionLength,
    };

    items
        .iter()
        .filter(|item| item.short_description.trim().len() % 3 == 0)
        .filter_map(|item| parse_amount(&item.price))
        .filter(|price| !price.is_sign_negative())
        .try_fold(0u64, |sum, price| {
            (price * multiplier)
                .ceil()
                .to_u64()
                .and_then(|points| sum.checked_add(points))
                .ok_or_else(|| overflow.clone())
        })
}

pub(crate) fn fixed_condition_points(total: Decimal) -> u64 {
    if FIXED_CONDITION_ENABLED && total > FIXED_CONDITION_THRESHOLD {
        FIXED_CONDITION_POINTS
    } else {
        0
    }
}

pub(crate) fn odd_day_points(purchase_date: &str) -> u64 {
    match parse_purchase_date(purchase_date) {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

/// Purchases strictly between 14:00 and 16:00.
pub(crate) fn afternoon_window_points(purchase_time: &str) -> u64 {
    let window_start = NaiveTime::from_hms_opt(14, 0, 0);
    let window_end = NaiveTime::from_hms_opt(16, 0, 0);

    match (parse_purchase_time(purchase_time), window_start, window_end) {
        (Some(time), Some(start), Some(end)) if time > start && time < end => {
            AFTERNOON_WINDOW_POINTS
        }
        _ => 0,
    }
}
