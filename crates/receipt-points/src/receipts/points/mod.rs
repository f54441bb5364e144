mod parsing;
mod rules;

pub(crate) use parsing::{parse_amount, parse_purchase_date, parse_purchase_time};

use serde::{Deserialize, Serialize};

use super::domain::Item;

/// Scoring rules, in the order they are evaluated and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescriptionLength,
    /// Reserved rule that is disabled and always contributes zero.
    FixedCondition,
    OddPurchaseDay,
    AfternoonWindow,
}

impl PointsRule {
    pub const ALL: [PointsRule; 8] = [
        PointsRule::RetailerName,
        PointsRule::RoundDollarTotal,
        PointsRule::QuarterMultipleTotal,
        PointsRule::ItemPairs,
        PointsRule::ItemDescriptionLength,
        PointsRule::FixedCondition,
        PointsRule::OddPurchaseDay,
        PointsRule::AfternoonWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PointsRule::RetailerName => "retailer name characters",
            PointsRule::RoundDollarTotal => "round dollar total",
            PointsRule::QuarterMultipleTotal => "total is a multiple of 0.25",
            PointsRule::ItemPairs => "every two items",
            PointsRule::ItemDescriptionLength => "item description length",
            PointsRule::FixedCondition => "fixed condition (disabled)",
            PointsRule::OddPurchaseDay => "odd purchase day",
            PointsRule::AfternoonWindow => "purchased between 14:00 and 16:00",
        }
    }
}

/// Points earned from a single rule, kept so a score can be audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: PointsRule,
    pub points: u64,
}

/// Per-rule contributions and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub total: u64,
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: PointsRule) -> u64 {
        self.contributions
            .iter()
            .find(|contribution| contribution.rule == rule)
            .map(|contribution| contribution.points)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointsError {
    #[error("receipt total '{value}' is not a valid number")]
    InvalidTotal { value: String },
    #[error("points for rule '{}' exceed the supported range", rule.label())]
    Overflow { rule: PointsRule },
}

/// Runs every rule once and returns the individual contributions with their sum.
///
/// An unparseable `total` fails the computation, as does a score too large for `u64`. A bad
/// item price, date, or time is scored as zero by the rule that reads it.
pub fn breakdown(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    total: &str,
    items: &[Item],
) -> Result<PointsBreakdown, PointsError> {
    let parsed_total = parse_amount(total).ok_or_else(|| PointsError::InvalidTotal {
        value: total.to_string(),
    })?;

    let contributions = PointsRule::ALL
        .iter()
        .map(|&rule| {
            let points = match rule {
                PointsRule::RetailerName => rules::retailer_name_points(retailer),
                PointsRule::RoundDollarTotal => rules::round_dollar_points(parsed_total),
                PointsRule::QuarterMultipleTotal => rules::quarter_multiple_points(parsed_total),
                PointsRule::ItemPairs => rules::item_pair_points(items),
                PointsRule::ItemDescriptionLength => rules::item_description_points(items)?,
                PointsRule::FixedCondition => rules::fixed_condition_points(parsed_total),
                PointsRule::OddPurchaseDay => rules::odd_day_points(purchase_date),
                PointsRule::AfternoonWindow => rules::afternoon_window_points(purchase_time),
            };
            Ok(RuleContribution { rule, points })
        })
        .collect::<Result<Vec<_>, PointsError>>()?;

    let total = contributions
        .iter()
        .try_fold(0u64, |sum, contribution| {
            sum.checked_add(contribution.points)
                .ok_or(PointsError::Overflow {
                    rule: contribution.rule,
                })
        })?;

    Ok(PointsBreakdown {
        total,
        contributions,
    })
}

pub fn calculate_points(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    total: &str,
    items: &[Item],
) -> Result<u64, PointsError> {
    breakdown(retailer, purchase_date, purchase_time, total, items).map(|result| result.total)
}
