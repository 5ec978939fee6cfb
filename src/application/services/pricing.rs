//! Pricing service: quotes every tier for a usage selection

use tracing::debug;

use crate::domain::pricing::{
    default_support_add_on, FeatureComparison, SupportAddOn, Tier, TierCatalog, TierQuote,
    UsageSelection,
};
use crate::shared::errors::PricingError;

/// Stateless wrapper around the tier catalog and the pricing engine
#[derive(Debug, Clone)]
pub struct PricingService {
    catalog: TierCatalog,
    support: SupportAddOn,
    currency: String,
    currency_symbol: String,
}

impl PricingService {
    pub fn new(catalog: TierCatalog, support: SupportAddOn, currency: impl Into<String>) -> Self {
        let currency = currency.into();
        let currency_symbol = currency_symbol(&currency).to_string();
        Self {
            catalog,
            support,
            currency,
            currency_symbol,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        self.catalog.tiers()
    }

    pub fn support_add_on(&self) -> &SupportAddOn {
        &self.support
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// One quote per tier, in catalog order.
    pub fn quote_all(&self, usage: &UsageSelection) -> Vec<TierQuote> {
        let quotes: Vec<TierQuote> = self
            .catalog
            .tiers()
            .iter()
            .map(|tier| TierQuote::compute(tier, usage, &self.support, &self.currency_symbol))
            .collect();

        metrics::counter!("pricing_quotes_total", "period" => usage.billing_period.to_string())
            .increment(1);
        debug!(
            period = %usage.billing_period,
            users = usage.users,
            projects = usage.projects,
            storage_units = usage.storage_units,
            premium_support = usage.premium_support,
            tiers = quotes.len(),
            "Pricing quote computed"
        );

        quotes
    }

    /// Quote for a single tier by name (case-insensitive).
    pub fn quote_tier(&self, name: &str, usage: &UsageSelection) -> Result<TierQuote, PricingError> {
        let tier = self
            .catalog
            .find(name)
            .ok_or_else(|| PricingError::UnknownTier(name.to_string()))?;
        Ok(TierQuote::compute(tier, usage, &self.support, &self.currency_symbol))
    }

    /// Feature comparison table for the tiers of this catalog.
    pub fn comparison(&self) -> FeatureComparison {
        self.catalog.feature_comparison()
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new(TierCatalog::builtin(), default_support_add_on(), "USD")
    }
}

fn currency_symbol(code: &str) -> &'static str {
    match code.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{BillingPeriod, RateTable};
    use rust_decimal::Decimal;

    #[test]
    fn quotes_every_tier_in_order() {
        let service = PricingService::default();
        let quotes = service.quote_all(&UsageSelection::default());
        let names: Vec<&str> = quotes.iter().map(|q| q.tier_name.as_str()).collect();
        assert_eq!(names, vec!["Starter", "Professional", "Enterprise"]);
        assert_eq!(quotes[0].price, Decimal::from(104));
        assert_eq!(quotes[1].price, Decimal::from(118));
        assert_eq!(quotes[2].price, Decimal::from(142));
    }

    #[test]
    fn custom_support_add_on_is_used() {
        let support = RateTable::new("support", Decimal::from(10), Decimal::from(100)).unwrap();
        let service = PricingService::new(TierCatalog::builtin(), support, "USD");
        let usage = UsageSelection {
            premium_support: true,
            ..UsageSelection::default()
        };
        let quote = service.quote_tier("professional", &usage).unwrap();
        assert_eq!(quote.price, Decimal::from(128));
    }

    #[test]
    fn unknown_tier_is_an_error() {
        let service = PricingService::default();
        let err = service
            .quote_tier("Platinum", &UsageSelection::default())
            .unwrap_err();
        assert_eq!(err, PricingError::UnknownTier("Platinum".to_string()));
    }

    #[test]
    fn comparison_describes_the_configured_catalog() {
        let cfg: crate::domain::pricing::TierConfig = toml::from_str(
            r#"
            name = "Big"
            base_price = { monthly = 100, yearly = 1000 }
            price_per_user = { monthly = 0, yearly = 0 }
            price_per_project = { monthly = 0, yearly = 0 }
            price_per_storage_unit = { monthly = 0, yearly = 0 }
            comparison = [{ feature = "API Access", included = true }]
            "#,
        )
        .unwrap();
        let catalog = TierCatalog::from_config(&[cfg]).unwrap();
        let service = PricingService::new(catalog, default_support_add_on(), "USD");

        let table = service.comparison();
        let quote_names: Vec<String> = service
            .quote_all(&UsageSelection::default())
            .into_iter()
            .map(|q| q.tier_name)
            .collect();
        assert_eq!(table.tiers, quote_names);
        assert_eq!(table.tiers, vec!["Big"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn euro_prices_use_euro_symbol() {
        let service = PricingService::new(TierCatalog::builtin(), default_support_add_on(), "eur");
        let usage = UsageSelection::default().with_period(BillingPeriod::Yearly);
        let quote = service.quote_tier("Starter", &usage).unwrap();
        assert_eq!(quote.formatted_price, "€1040");
    }

    #[test]
    fn unknown_currency_has_no_symbol() {
        let service = PricingService::new(TierCatalog::builtin(), default_support_add_on(), "UZS");
        let quote = service.quote_tier("Starter", &UsageSelection::default()).unwrap();
        assert_eq!(quote.formatted_price, "104");
    }
}
