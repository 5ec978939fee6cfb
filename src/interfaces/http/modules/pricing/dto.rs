//! Pricing DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::pricing::{
    BillingPeriod, RateTable, Tier, TierQuote, UsageSelection, PROJECTS_RANGE, STORAGE_RANGE,
    STORAGE_STEP, USERS_RANGE,
};

/// Tier catalog with the shared add-on price
#[derive(Debug, Serialize, ToSchema)]
pub struct TierCatalogResponse {
    pub currency: String,
    pub support_add_on: RateTable,
    pub limits: UsageLimits,
    pub defaults: UsageSelection,
    pub tiers: Vec<Tier>,
}

/// Inclusive slider bounds accepted by the quote endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsageLimits {
    pub users: SliderRange,
    pub projects: SliderRange,
    pub storage_units: SliderRange,
}

impl Default for UsageLimits {
    fn default() -> Self {
        let range = |(min, max): (u32, u32), step| SliderRange { min, max, step };
        Self {
            users: range(USERS_RANGE, 1),
            projects: range(PROJECTS_RANGE, 1),
            storage_units: range(STORAGE_RANGE, STORAGE_STEP),
        }
    }
}

/// Usage selection as sent by the calculator.
///
/// Missing fields take the calculator defaults (monthly, 5 users,
/// 3 projects, 10 storage units, no premium support).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct QuoteRequest {
    pub billing_period: BillingPeriod,
    #[validate(range(min = 1, max = 100, message = "users must be between 1 and 100"))]
    pub users: u32,
    #[validate(range(min = 1, max = 50, message = "projects must be between 1 and 50"))]
    pub projects: u32,
    #[validate(
        range(min = 5, max = 1000, message = "storage_units must be between 5 and 1000"),
        custom(function = "validate_storage_step")
    )]
    pub storage_units: u32,
    pub premium_support: bool,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        UsageSelection::default().into()
    }
}

impl From<UsageSelection> for QuoteRequest {
    fn from(u: UsageSelection) -> Self {
        Self {
            billing_period: u.billing_period,
            users: u.users,
            projects: u.projects,
            storage_units: u.storage_units,
            premium_support: u.premium_support,
        }
    }
}

impl From<QuoteRequest> for UsageSelection {
    fn from(r: QuoteRequest) -> Self {
        Self {
            billing_period: r.billing_period,
            users: r.users,
            projects: r.projects,
            storage_units: r.storage_units,
            premium_support: r.premium_support,
        }
    }
}

fn validate_storage_step(value: u32) -> Result<(), ValidationError> {
    if value % STORAGE_STEP != 0 {
        let mut err = ValidationError::new("storage_step");
        err.message = Some(format!("storage_units must be a multiple of {}", STORAGE_STEP).into());
        return Err(err);
    }
    Ok(())
}

/// One tier card
#[derive(Debug, Serialize, ToSchema)]
pub struct TierQuoteDto {
    pub tier_name: String,
    /// Exact total for the selected period
    pub price: Decimal,
    /// Price rounded to cents
    pub display_price: Decimal,
    pub formatted_price: String,
    /// `month` or `year`
    pub period_unit: String,
    /// Yearly savings against paying monthly, only for yearly quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<i64>,
    pub highlighted: bool,
}

impl From<TierQuote> for TierQuoteDto {
    fn from(q: TierQuote) -> Self {
        Self {
            tier_name: q.tier_name,
            price: q.price,
            display_price: q.display_price,
            formatted_price: q.formatted_price,
            period_unit: q.period_unit.to_string(),
            savings_percent: q.savings_percent,
            highlighted: q.highlighted,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub currency: String,
    pub usage: UsageSelection,
    pub quotes: Vec<TierQuoteDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let req = QuoteRequest::default();
        assert!(req.validate().is_ok());
        assert_eq!(UsageSelection::from(req), UsageSelection::default());
    }

    #[test]
    fn storage_must_follow_slider_step() {
        let req = QuoteRequest {
            storage_units: 12,
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("storage_units"));
    }

    #[test]
    fn storage_step_check() {
        assert!(validate_storage_step(STORAGE_STEP * 3).is_ok());
        let err = validate_storage_step(STORAGE_STEP + 1).unwrap_err();
        assert_eq!(err.code, "storage_step");
    }

    #[test]
    fn advertised_limits_match_validation() {
        let limits = UsageLimits::default();
        let edge = |users, projects, storage_units| QuoteRequest {
            users,
            projects,
            storage_units,
            ..Default::default()
        };

        let lower = edge(limits.users.min, limits.projects.min, limits.storage_units.min);
        let upper = edge(limits.users.max, limits.projects.max, limits.storage_units.max);
        assert!(lower.validate().is_ok());
        assert!(upper.validate().is_ok());

        let beyond = edge(
            limits.users.max + 1,
            limits.projects.max + 1,
            limits.storage_units.max + limits.storage_units.step,
        );
        let errors = beyond.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn out_of_range_users_are_rejected() {
        for users in [0, 101] {
            let req = QuoteRequest {
                users,
                ..Default::default()
            };
            assert!(req.validate().is_err(), "users={} should be rejected", users);
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let req: QuoteRequest =
            serde_json::from_str(r#"{"billing_period": "yearly", "users": 1}"#).unwrap();
        assert_eq!(req.billing_period, BillingPeriod::Yearly);
        assert_eq!(req.users, 1);
        assert_eq!(req.projects, 3);
        assert_eq!(req.storage_units, 10);
    }

    #[test]
    fn monthly_quote_omits_savings() {
        let dto = TierQuoteDto {
            tier_name: "Starter".into(),
            price: Decimal::from(104),
            display_price: Decimal::from(104),
            formatted_price: "$104".into(),
            period_unit: "month".into(),
            savings_percent: None,
            highlighted: false,
        };
        let json = serde_json::to_value(dto).unwrap();
        assert!(json.get("savings_percent").is_none());
        assert_eq!(json["price"], serde_json::json!(104.0));
    }
}
