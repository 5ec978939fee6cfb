//! Pricing calculator REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{QuoteRequest, QuoteResponse, TierCatalogResponse, TierQuoteDto, UsageLimits};
use crate::application::PricingService;
use crate::domain::pricing::{FeatureComparison, UsageSelection};
use crate::interfaces::http::common::{
    pricing_error, ApiError, ApiResponse, ValidatedJson, ValidatedQuery,
};

/// Pricing handler state
#[derive(Clone)]
pub struct PricingState {
    pub pricing: Arc<PricingService>,
}

fn quote_response(pricing: &PricingService, usage: UsageSelection) -> QuoteResponse {
    let quotes = pricing
        .quote_all(&usage)
        .into_iter()
        .map(TierQuoteDto::from)
        .collect();
    QuoteResponse {
        currency: pricing.currency().to_string(),
        usage,
        quotes,
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing/tiers",
    tag = "Pricing",
    responses(
        (status = 200, description = "Tier catalog", body = ApiResponse<TierCatalogResponse>)
    )
)]
pub async fn list_tiers(
    State(state): State<PricingState>,
) -> Json<ApiResponse<TierCatalogResponse>> {
    Json(ApiResponse::success(TierCatalogResponse {
        currency: state.pricing.currency().to_string(),
        support_add_on: *state.pricing.support_add_on(),
        limits: UsageLimits::default(),
        defaults: UsageSelection::default(),
        tiers: state.pricing.tiers().to_vec(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/pricing/quote",
    tag = "Pricing",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote for every tier", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Usage outside slider ranges")
    )
)]
pub async fn create_quote(
    State(state): State<PricingState>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ApiError> {
    Ok(Json(ApiResponse::success(quote_response(
        &state.pricing,
        req.into(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing/quote",
    tag = "Pricing",
    params(QuoteRequest),
    responses(
        (status = 200, description = "Quote for every tier", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Malformed query"),
        (status = 422, description = "Usage outside slider ranges")
    )
)]
pub async fn quote_from_query(
    State(state): State<PricingState>,
    ValidatedQuery(req): ValidatedQuery<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ApiError> {
    Ok(Json(ApiResponse::success(quote_response(
        &state.pricing,
        req.into(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing/quote/{tier}",
    tag = "Pricing",
    params(
        ("tier" = String, Path, description = "Tier name, case-insensitive"),
        QuoteRequest
    ),
    responses(
        (status = 200, description = "Quote for one tier", body = ApiResponse<TierQuoteDto>),
        (status = 404, description = "Unknown tier"),
        (status = 422, description = "Usage outside slider ranges")
    )
)]
pub async fn quote_tier(
    State(state): State<PricingState>,
    Path(tier): Path<String>,
    ValidatedQuery(req): ValidatedQuery<QuoteRequest>,
) -> Result<Json<ApiResponse<TierQuoteDto>>, ApiError> {
    let usage: UsageSelection = req.into();
    let quote = state
        .pricing
        .quote_tier(&tier, &usage)
        .map_err(pricing_error)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/pricing/comparison",
    tag = "Pricing",
    responses(
        (status = 200, description = "Feature comparison table", body = ApiResponse<FeatureComparison>)
    )
)]
pub async fn get_feature_comparison(
    State(state): State<PricingState>,
) -> Json<ApiResponse<FeatureComparison>> {
    Json(ApiResponse::success(state.pricing.comparison()))
}
