//! Subscription pricing
//!
//! Contains the tier model, the tier catalog, and the pricing engine.

pub mod catalog;
pub mod engine;
pub mod model;
pub mod quote;

pub use catalog::{
    ComparisonConfig, ComparisonRow, FeatureComparison, RateConfig, TierCatalog, TierConfig,
};
pub use engine::{compute_price, compute_yearly_savings_percent, format_amount, round_to_cents};
pub use model::{
    default_support_add_on, BillingPeriod, ComparisonCell, ComparisonEntry, RateTable,
    SupportAddOn, Tier, TierRates, UsageSelection, MAX_RATE, PROJECTS_RANGE, STORAGE_RANGE,
    STORAGE_STEP, USERS_RANGE,
};
pub use quote::TierQuote;
