use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw).ok()
}

fn all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit())
}

/// `YYYY-MM-DD` with zero-padded month and day. chrono alone accepts `2022-1-1`.
pub(crate) fn parse_purchase_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let shaped = matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(year), Some(month), Some(day), None)
            if year.len() == 4 && month.len() == 2 && day.len() == 2
                && [year, month, day].iter().all(|part| all_digits(part))
    );
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// 24-hour `HH:MM`; the hour may drop its leading zero, the minutes may not.
pub(crate) fn parse_purchase_time(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(':')?;
    let shaped = (1..=2).contains(&hour.len())
        && minute.len() == 2
        && all_digits(hour)
        && all_digits(minute);
    if !shaped {
        return None;
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
}
