//! Tier catalog
//!
//! The set of tiers is fixed for the life of the process. It is either the
//! built-in catalog or one loaded from the `[[pricing.tiers]]` configuration
//! section.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{call_to_action, ComparisonCell, ComparisonEntry, RateTable, Tier, TierRates};
use crate::shared::errors::PricingError;

/// Immutable, validated list of tiers in display order.
#[derive(Debug, Clone)]
pub struct TierCatalog {
    tiers: Vec<Tier>,
}

impl TierCatalog {
    /// Validates that the catalog is non-empty and tier names are unique
    /// (case-insensitive).
    pub fn new(tiers: Vec<Tier>) -> Result<Self, PricingError> {
        if tiers.is_empty() {
            return Err(PricingError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.name.to_lowercase()) {
                return Err(PricingError::DuplicateTier(tier.name.clone()));
            }
        }
        Ok(Self { tiers })
    }

    /// Starter, Professional and Enterprise.
    pub fn builtin() -> Self {
        use ComparisonCell::{Excluded, Included};
        let text = |s: &str| ComparisonCell::Text(s.to_string());

        let starter = builtin_tier(
            "Starter",
            "Perfect for small projects and individuals",
            TierRates {
                base_price: RateTable::whole(29, 290),
                price_per_user: RateTable::whole(5, 50),
                price_per_project: RateTable::whole(10, 100),
                price_per_storage_unit: RateTable::whole(2, 20),
            },
            &["5 projects", "Up to 10 users", "Basic analytics", "24-hour support"],
            &["Advanced security", "Custom domain", "API access", "Dedicated support"],
            false,
            vec![
                ("Projects", text("5")),
                ("Team Members", text("Up to 10")),
                ("Storage", text("10GB")),
                ("Analytics", text("Basic")),
                ("Support", text("24-hour")),
                ("Advanced Security", Excluded),
                ("Custom Domain", Excluded),
                ("API Access", Excluded),
            ],
        );

        let professional = builtin_tier(
            "Professional",
            "Ideal for growing teams and businesses",
            TierRates {
                base_price: RateTable::whole(59, 590),
                price_per_user: RateTable::whole(4, 40),
                price_per_project: RateTable::whole(8, 80),
                price_per_storage_unit: RateTable::exact(Decimal::new(15, 1), Decimal::from(15)),
            },
            &[
                "15 projects",
                "Up to 50 users",
                "Advanced analytics",
                "Priority support",
                "Advanced security",
            ],
            &["Custom domain", "API access"],
            true,
            vec![
                ("Projects", text("15")),
                ("Team Members", text("Up to 50")),
                ("Storage", text("50GB")),
                ("Analytics", text("Advanced")),
                ("Support", text("Priority")),
                ("Advanced Security", Included),
                ("Custom Domain", Excluded),
                ("API Access", Excluded),
            ],
        );

        let enterprise = builtin_tier(
            "Enterprise",
            "For large organizations with complex needs",
            TierRates {
                base_price: RateTable::whole(99, 990),
                price_per_user: RateTable::whole(3, 30),
                price_per_project: RateTable::whole(6, 60),
                price_per_storage_unit: RateTable::whole(1, 10),
            },
            &[
                "Unlimited projects",
                "Unlimited users",
                "Premium analytics",
                "24/7 dedicated support",
                "Advanced security",
                "Custom domain",
                "API access",
            ],
            &[],
            false,
            vec![
                ("Projects", text("Unlimited")),
                ("Team Members", text("Unlimited")),
                ("Storage", text("Unlimited")),
                ("Analytics", text("Premium")),
                ("Support", text("24/7 Dedicated")),
                ("Advanced Security", Included),
                ("Custom Domain", Included),
                ("API Access", Included),
            ],
        );

        Self {
            tiers: vec![starter, professional, enterprise],
        }
    }

    /// Builds a catalog from configuration entries, validating every rate.
    pub fn from_config(entries: &[TierConfig]) -> Result<Self, PricingError> {
        let tiers = entries
            .iter()
            .map(TierConfig::to_tier)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tiers)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Case-insensitive lookup by tier name.
    pub fn find(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// One column per tier in catalog order. Rows are every feature any
    /// tier lists, in first-seen order.
    pub fn feature_comparison(&self) -> FeatureComparison {
        let mut features: Vec<&str> = Vec::new();
        for entry in self.tiers.iter().flat_map(|t| &t.comparison) {
            if !features.contains(&entry.feature.as_str()) {
                features.push(&entry.feature);
            }
        }

        let rows = features
            .into_iter()
            .map(|feature| ComparisonRow {
                feature: feature.to_string(),
                cells: self.tiers.iter().map(|t| t.comparison_cell(feature)).collect(),
            })
            .collect();

        FeatureComparison {
            tiers: self.tiers.iter().map(|t| t.name.clone()).collect(),
            rows,
        }
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_tier(
    name: &str,
    description: &str,
    rates: TierRates,
    features: &[&str],
    not_included: &[&str],
    highlighted: bool,
    comparison: Vec<(&str, ComparisonCell)>,
) -> Tier {
    let to_owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    Tier {
        name: name.to_string(),
        description: description.to_string(),
        base_price: rates.base_price,
        price_per_user: rates.price_per_user,
        price_per_project: rates.price_per_project,
        price_per_storage_unit: rates.price_per_storage_unit,
        features: to_owned(features),
        not_included: to_owned(not_included),
        highlighted,
        cta: call_to_action(name).to_string(),
        comparison: comparison
            .into_iter()
            .map(|(feature, cell)| ComparisonEntry::new(feature, cell))
            .collect(),
    }
}

/// Monthly and yearly rate as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RateConfig {
    pub monthly: Decimal,
    pub yearly: Decimal,
}

/// One `[[pricing.tiers]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: RateConfig,
    pub price_per_user: RateConfig,
    pub price_per_project: RateConfig,
    pub price_per_storage_unit: RateConfig,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub not_included: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
    /// Rows of the comparison table, e.g.
    /// `{ feature = "Storage", value = "50GB" }` or
    /// `{ feature = "API Access", included = true }`.
    #[serde(default)]
    pub comparison: Vec<ComparisonConfig>,
}

/// One cell of a tier's comparison column as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonConfig {
    pub feature: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub included: bool,
}

impl ComparisonConfig {
    fn to_entry(&self) -> ComparisonEntry {
        let cell = match (&self.value, self.included) {
            (Some(text), _) => ComparisonCell::Text(text.clone()),
            (None, true) => ComparisonCell::Included,
            (None, false) => ComparisonCell::Excluded,
        };
        ComparisonEntry::new(self.feature.clone(), cell)
    }
}

impl TierConfig {
    pub fn to_tier(&self) -> Result<Tier, PricingError> {
        let rate = |field, r: &RateConfig| RateTable::new(field, r.monthly, r.yearly);
        let rates = TierRates {
            base_price: rate("base_price", &self.base_price)?,
            price_per_user: rate("price_per_user", &self.price_per_user)?,
            price_per_project: rate("price_per_project", &self.price_per_project)?,
            price_per_storage_unit: rate("price_per_storage_unit", &self.price_per_storage_unit)?,
        };
        Tier::new(
            self.name.clone(),
            self.description.clone(),
            rates,
            self.features.clone(),
            self.not_included.clone(),
            self.highlighted,
        )
        .map(|tier| {
            let comparison = self.comparison.iter().map(ComparisonConfig::to_entry).collect();
            tier.with_comparison(comparison)
        })
    }
}

// ── Feature comparison ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComparisonRow {
    pub feature: String,
    /// One cell per tier, in catalog column order.
    pub cells: Vec<ComparisonCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeatureComparison {
    pub tiers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}
