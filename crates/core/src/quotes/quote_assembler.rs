//! Pure assembly of a quote from resolved selections.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::casting::SeriesRate;
use crate::catalogs::ComponentGroup;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PATH_SEPARATOR};
use crate::errors::{Result, ValidationError};
use crate::fx::CurrencyConverter;
use crate::pricing::{casting_total, sum_subtotals, ResolvedSelection};

use super::{CastingSummary, CustomCost, CustomCostLine, QuoteLineItem};

/// A component selection after its catalog was loaded and its path resolved.
#[derive(Debug, Clone)]
pub struct ResolvedComponent {
    pub label: String,
    pub catalog_id: String,
    pub group: ComponentGroup,
    pub selection: ResolvedSelection,
}

/// The priced body of a quote, before identity and customer are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledQuote {
    pub line_items: Vec<QuoteLineItem>,
    pub casting: Option<CastingSummary>,
    pub components_total: Decimal,
    pub custom_costs: Vec<CustomCostLine>,
    pub custom_costs_total: Decimal,
    pub base_currency: String,
    pub base_total: Decimal,
    pub currency: String,
    pub exchange_rate: Decimal,
    pub total: Decimal,
}

/// Combines component subtotals, the casting formula and custom costs, then
/// converts the base total into the requested currency once.
pub struct QuoteAssembler<'a> {
    converter: &'a CurrencyConverter,
}

impl<'a> QuoteAssembler<'a> {
    pub fn new(converter: &'a CurrencyConverter) -> Self {
        Self { converter }
    }

    pub fn assemble(
        &self,
        components: Vec<ResolvedComponent>,
        series: Option<&SeriesRate>,
        custom_costs: &BTreeMap<String, CustomCost>,
        currency: &str,
    ) -> Result<AssembledQuote> {
        let has_casting = components
            .iter()
            .any(|c| c.group == ComponentGroup::Casting);
        let series = match (has_casting, series) {
            (true, None) => {
                return Err(ValidationError::MissingField("series".to_string()).into());
            }
            (true, Some(series)) => Some(series),
            (false, _) => None,
        };

        let casting = series.map(|series| {
            let group = casting_total(
                components
                    .iter()
                    .filter(|c| c.group == ComponentGroup::Casting)
                    .map(|c| c.selection.terminal_casting.as_ref()),
                series.rate,
            );
            CastingSummary {
                type_name: series.type_name.clone(),
                series_name: series.series_name.clone(),
                rate: group.rate,
                total_weight: group.total_weight,
                total_machining: group.total_machining,
                total: group.total,
            }
        });

        let line_items: Vec<QuoteLineItem> = components
            .into_iter()
            .map(|c| {
                let subtotal = match c.group {
                    ComponentGroup::Priced => c.selection.total,
                    ComponentGroup::Casting => series
                        .map(|s| {
                            casting_total([c.selection.terminal_casting.as_ref()], s.rate).total
                        })
                        .unwrap_or(Decimal::ZERO),
                };
                QuoteLineItem {
                    description: c.selection.breakdown.path_label(PATH_SEPARATOR),
                    label: c.label,
                    catalog_id: c.catalog_id,
                    group: c.group,
                    path: c.selection.path,
                    casting: c.selection.terminal_casting,
                    breakdown: c.selection.breakdown,
                    subtotal,
                }
            })
            .collect();

        let components_total = sum_subtotals(
            line_items
                .iter()
                .filter(|item| item.group == ComponentGroup::Priced)
                .map(|item| item.subtotal),
        );

        let custom_costs = custom_cost_lines(custom_costs)?;
        let custom_costs_total = sum_subtotals(custom_costs.iter().map(|c| c.price));

        let casting_group_total = casting.as_ref().map(|c| c.total).unwrap_or(Decimal::ZERO);
        let base_total = casting_group_total + components_total + custom_costs_total;

        let exchange_rate = self.converter.get_rate(currency)?;
        let total = self
            .converter
            .convert_from_base(base_total, currency)?
            .round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            );

        Ok(AssembledQuote {
            line_items,
            casting,
            components_total,
            custom_costs,
            custom_costs_total,
            base_currency: self.converter.base_currency().to_string(),
            base_total,
            currency: currency.trim().to_uppercase(),
            exchange_rate,
            total,
        })
    }
}

/// Rejects negative prices; zero-price entries are kept.
fn custom_cost_lines(custom_costs: &BTreeMap<String, CustomCost>) -> Result<Vec<CustomCostLine>> {
    custom_costs
        .iter()
        .map(|(name, cost)| -> Result<CustomCostLine> {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("custom cost name".to_string()).into());
            }
            if cost.price < Decimal::ZERO {
                return Err(ValidationError::InvalidInput(format!(
                    "Custom cost \"{}\" has a negative price",
                    name
                ))
                .into());
            }
            Ok(CustomCostLine {
                name: name.trim().to_string(),
                price: cost.price,
                notes: cost.notes.clone(),
            })
        })
        .collect()
}
