//! Totals for resolved selections.
//!
//! Two rules live here and are kept apart: the generic breakdown sum used by
//! fittings, actuators and painting, and the weight-based casting formula used by
//! the body, bonnet and trim group.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing_model::CastingAttributes;
use crate::utils::decimal_serde;

/// One traversed level of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub level_label: String,
    pub chosen_name: String,
    #[serde(with = "decimal_serde")]
    pub price: Decimal,
}

/// Itemised entries of one selection and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionBreakdown {
    pub entries: Vec<BreakdownEntry>,
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
}

impl SelectionBreakdown {
    pub fn from_entries(entries: Vec<BreakdownEntry>) -> Self {
        let total = breakdown_total(&entries);
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chosen names joined for display, e.g. `Ball Valves → Stainless Steel`.
    pub fn path_label(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(|e| e.chosen_name.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

pub fn breakdown_total(entries: &[BreakdownEntry]) -> Decimal {
    entries.iter().map(|e| e.price).sum()
}

/// Result of the casting group formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CastingTotal {
    #[serde(with = "decimal_serde")]
    pub total_weight: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_machining: Decimal,
    #[serde(with = "decimal_serde")]
    pub rate: Decimal,
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
}

/// `Σ weight · rate + Σ machining_charge`.
///
/// Parts without casting data contribute nothing; missing values count as zero.
pub fn casting_total<'a, I>(parts: I, rate: Decimal) -> CastingTotal
where
    I: IntoIterator<Item = Option<&'a CastingAttributes>>,
{
    let (total_weight, total_machining) = parts
        .into_iter()
        .flatten()
        .fold((Decimal::ZERO, Decimal::ZERO), |(weight, machining), part| {
            (
                weight + part.weight_or_zero(),
                machining + part.machining_charge_or_zero(),
            )
        });

    CastingTotal {
        total_weight,
        total_machining,
        rate,
        total: total_weight * rate + total_machining,
    }
}

/// Sum of independent component subtotals.
pub fn sum_subtotals<I>(subtotals: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    subtotals.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(label: &str, name: &str, price: Decimal) -> BreakdownEntry {
        BreakdownEntry {
            level_label: label.to_string(),
            chosen_name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_breakdown_sums_entries() {
        let breakdown = SelectionBreakdown::from_entries(vec![
            entry("Valve Type", "Ball Valves", dec!(500)),
            entry("Material", "Stainless Steel", dec!(300)),
            entry("Size", "2-inch", dec!(200)),
        ]);
        assert_eq!(breakdown.total, dec!(1000));
        assert_eq!(
            breakdown.path_label(" → "),
            "Ball Valves → Stainless Steel → 2-inch"
        );
    }

    #[test]
    fn test_empty_breakdown_is_zero() {
        let breakdown = SelectionBreakdown::from_entries(vec![]);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total, Decimal::ZERO);
    }

    #[test]
    fn test_casting_formula() {
        let body = CastingAttributes::new(dec!(10), dec!(200));
        let bonnet = CastingAttributes::new(dec!(5), dec!(100));
        let result = casting_total([Some(&body), Some(&bonnet)], dec!(50));
        assert_eq!(result.total_weight, dec!(15));
        assert_eq!(result.total_machining, dec!(300));
        assert_eq!(result.total, dec!(1050));
    }

    #[test]
    fn test_casting_ignores_missing_data() {
        let partial = CastingAttributes {
            weight: Some(dec!(2.5)),
            machining_charge: None,
        };
        let result = casting_total([None, Some(&partial)], dec!(40));
        assert_eq!(result.total, dec!(100));
        assert_eq!(result.total_machining, Decimal::ZERO);
    }

    #[test]
    fn test_sum_subtotals() {
        assert_eq!(sum_subtotals([dec!(1050), dec!(250.50), dec!(0)]), dec!(1300.50));
        assert_eq!(sum_subtotals(Vec::<Decimal>::new()), Decimal::ZERO);
    }
}
