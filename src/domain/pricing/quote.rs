//! Per-tier price quote for one usage selection

use rust_decimal::Decimal;

use super::engine::{compute_price, compute_yearly_savings_percent, format_amount, round_to_cents};
use super::model::{BillingPeriod, SupportAddOn, Tier, UsageSelection};

/// What a tier card shows for the current usage selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TierQuote {
    pub tier_name: String,
    pub billing_period: BillingPeriod,
    /// Exact total for the selected period.
    pub price: Decimal,
    /// `price` rounded to cents.
    pub display_price: Decimal,
    pub formatted_price: String,
    /// `"month"` or `"year"`.
    pub period_unit: &'static str,
    /// Only present for yearly selections.
    pub savings_percent: Option<i64>,
    pub highlighted: bool,
}

impl TierQuote {
    pub fn compute(
        tier: &Tier,
        usage: &UsageSelection,
        support: &SupportAddOn,
        currency_symbol: &str,
    ) -> Self {
        let price = compute_price(tier, usage, support);
        let savings_percent = match usage.billing_period {
            BillingPeriod::Yearly => Some(compute_yearly_savings_percent(tier, usage, support)),
            BillingPeriod::Monthly => None,
        };

        Self {
            tier_name: tier.name.clone(),
            billing_period: usage.billing_period,
            price,
            display_price: round_to_cents(price),
            formatted_price: format_amount(price, currency_symbol),
            period_unit: usage.billing_period.unit_label(),
            savings_percent,
            highlighted: tier.highlighted,
        }
    }
}
