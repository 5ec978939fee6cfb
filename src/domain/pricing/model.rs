//! Pricing domain types
//!
//! Tiers carry a [`RateTable`] per priced dimension so that every rate is
//! looked up by [`BillingPeriod`] rather than by string key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::PricingError;

/// Period over which prices and per-unit rates are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Unit shown after a price, e.g. `$118/month`.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for BillingPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("unknown billing period: {}", other)),
        }
    }
}

/// Largest accepted rate. Keeps the total of the largest usage selection
/// well inside the range of [`Decimal`].
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A non-negative amount for each billing period, at most [`MAX_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RateTable {
    monthly: Decimal,
    yearly: Decimal,
}

impl RateTable {
    /// Builds a rate table, rejecting negative rates and rates above
    /// [`MAX_RATE`].
    ///
    /// `field` names the rate in the error (e.g. `"price_per_user"`).
    pub fn new(field: &'static str, monthly: Decimal, yearly: Decimal) -> Result<Self, PricingError> {
        for value in [monthly, yearly] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(PricingError::NegativeRate { field, value });
            }
            if value > MAX_RATE {
                return Err(PricingError::RateTooLarge {
                    field,
                    value,
                    max: MAX_RATE,
                });
            }
        }
        Ok(Self { monthly, yearly })
    }

    /// Unchecked constructor for rates known to be non-negative.
    pub(crate) fn exact(monthly: Decimal, yearly: Decimal) -> Self {
        Self { monthly, yearly }
    }

    /// Construct from whole currency units. Used for the built-in catalog.
    pub(crate) fn whole(monthly: u32, yearly: u32) -> Self {
        Self {
            monthly: Decimal::from(monthly),
            yearly: Decimal::from(yearly),
        }
    }

    pub fn get(&self, period: BillingPeriod) -> Decimal {
        match period {
            BillingPeriod::Monthly => self.monthly,
            BillingPeriod::Yearly => self.yearly,
        }
    }

    pub fn monthly(&self) -> Decimal {
        self.monthly
    }

    pub fn yearly(&self) -> Decimal {
        self.yearly
    }

    /// The yearly rate spread over twelve months, yearly rate unchanged.
    pub fn yearly_as_monthly(&self) -> Self {
        Self {
            monthly: self.yearly / Decimal::from(12),
            yearly: self.yearly,
        }
    }
}

/// A named pricing plan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Tier {
    pub name: String,
    pub description: String,
    pub base_price: RateTable,
    pub price_per_user: RateTable,
    pub price_per_project: RateTable,
    pub price_per_storage_unit: RateTable,
    pub features: Vec<String>,
    pub not_included: Vec<String>,
    pub highlighted: bool,
    /// Call-to-action label for the tier card.
    pub cta: String,
    /// This tier's column of the feature comparison table.
    #[serde(skip)]
    pub comparison: Vec<ComparisonEntry>,
}

/// A cell of the feature comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ComparisonCell {
    Text(String),
    Included,
    Excluded,
}

/// What a tier offers for one comparison row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub feature: String,
    pub cell: ComparisonCell,
}

impl ComparisonEntry {
    pub fn new(feature: impl Into<String>, cell: ComparisonCell) -> Self {
        Self {
            feature: feature.into(),
            cell,
        }
    }
}

/// Rates for a [`Tier`], grouped to keep [`Tier::new`] readable.
#[derive(Debug, Clone, Copy)]
pub struct TierRates {
    pub base_price: RateTable,
    pub price_per_user: RateTable,
    pub price_per_project: RateTable,
    pub price_per_storage_unit: RateTable,
}

impl Tier {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rates: TierRates,
        features: Vec<String>,
        not_included: Vec<String>,
        highlighted: bool,
    ) -> Result<Self, PricingError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PricingError::EmptyTierName);
        }
        let cta = call_to_action(&name);

        Ok(Self {
            name,
            description: description.into(),
            base_price: rates.base_price,
            price_per_user: rates.price_per_user,
            price_per_project: rates.price_per_project,
            price_per_storage_unit: rates.price_per_storage_unit,
            features,
            not_included,
            highlighted,
            cta: cta.to_string(),
            comparison: Vec::new(),
        })
    }

    pub fn with_comparison(mut self, comparison: Vec<ComparisonEntry>) -> Self {
        self.comparison = comparison;
        self
    }

    /// Cell for `feature`; features the tier does not list are excluded.
    pub fn comparison_cell(&self, feature: &str) -> ComparisonCell {
        self.comparison
            .iter()
            .find(|entry| entry.feature == feature)
            .map(|entry| entry.cell.clone())
            .unwrap_or(ComparisonCell::Excluded)
    }

    /// Copy of this tier whose monthly rates are the yearly rates divided by twelve.
    pub fn with_yearly_rates_as_monthly(&self) -> Self {
        Self {
            base_price: self.base_price.yearly_as_monthly(),
            price_per_user: self.price_per_user.yearly_as_monthly(),
            price_per_project: self.price_per_project.yearly_as_monthly(),
            price_per_storage_unit: self.price_per_storage_unit.yearly_as_monthly(),
            ..self.clone()
        }
    }
}

/// Enterprise plans are sold, everything else is self-serve.
pub(crate) fn call_to_action(tier_name: &str) -> &'static str {
    if tier_name.eq_ignore_ascii_case("enterprise") {
        "Contact Sales"
    } else {
        "Get Started"
    }
}

/// Lower and upper bounds of the usage sliders.
pub const USERS_RANGE: (u32, u32) = (1, 100);
pub const PROJECTS_RANGE: (u32, u32) = (1, 50);
pub const STORAGE_RANGE: (u32, u32) = (5, 1000);
pub const STORAGE_STEP: u32 = 5;

/// The user's chosen usage levels and add-ons.
///
/// The pricing engine does not clamp these values; callers enforce the
/// slider ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsageSelection {
    pub billing_period: BillingPeriod,
    pub users: u32,
    pub projects: u32,
    pub storage_units: u32,
    pub premium_support: bool,
}

impl Default for UsageSelection {
    fn default() -> Self {
        Self {
            billing_period: BillingPeriod::Monthly,
            users: 5,
            projects: 3,
            storage_units: 10,
            premium_support: false,
        }
    }
}

impl UsageSelection {
    pub fn with_period(self, billing_period: BillingPeriod) -> Self {
        Self {
            billing_period,
            ..self
        }
    }
}

/// Price of the premium support add-on per billing period.
pub type SupportAddOn = RateTable;

/// Default premium support pricing: 49/month, 490/year.
pub fn default_support_add_on() -> SupportAddOn {
    RateTable::whole(49, 490)
}
