//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookService, PricingService};
use crate::domain::book::{Genre, SortField, SortOrder};
use crate::domain::pricing::{
    BillingPeriod, ComparisonCell, ComparisonRow, FeatureComparison, RateTable, Tier,
    UsageSelection,
};

use super::common::{ApiResponse, PaginatedResponse};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{books, health, pricing};

/// State shared by every route. Axum extracts the per-module handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingService>,
    pub books: Arc<BookService>,
    pub started_at: Arc<Instant>,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(pricing: PricingService, books: BookService, prometheus: PrometheusHandle) -> Self {
        Self {
            pricing: Arc::new(pricing),
            books: Arc::new(books),
            started_at: Arc::new(Instant::now()),
            prometheus,
        }
    }
}

impl FromRef<AppState> for pricing::PricingState {
    fn from_ref(s: &AppState) -> Self {
        pricing::PricingState {
            pricing: Arc::clone(&s.pricing),
        }
    }
}

impl FromRef<AppState> for books::BookState {
    fn from_ref(s: &AppState) -> Self {
        books::BookState {
            books: Arc::clone(&s.books),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            books: Arc::clone(&s.books),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Pricing
        pricing::list_tiers,
        pricing::create_quote,
        pricing::quote_from_query,
        pricing::quote_tier,
        pricing::get_feature_comparison,
        // Books
        books::list_books,
        books::list_genres,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<books::BookDto>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Pricing
            BillingPeriod,
            RateTable,
            Tier,
            UsageSelection,
            ComparisonCell,
            ComparisonRow,
            FeatureComparison,
            pricing::TierCatalogResponse,
            pricing::UsageLimits,
            pricing::SliderRange,
            pricing::QuoteRequest,
            pricing::QuoteResponse,
            pricing::TierQuoteDto,
            // Books
            Genre,
            SortField,
            SortOrder,
            books::BookDto,
            books::CreateBookRequest,
            books::UpdateBookRequest,
            books::GenreDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Pricing", description = "Subscription tiers, price calculator and feature comparison"),
        (name = "Books", description = "Reading log: finished books with rating and notes"),
    ),
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Reading tracker and subscription pricing calculator",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let pricing_routes = Router::new()
        .route("/tiers", get(pricing::list_tiers))
        .route(
            "/quote",
            get(pricing::quote_from_query).post(pricing::create_quote),
        )
        .route("/quote/{tier}", get(pricing::quote_tier))
        .route("/comparison", get(pricing::get_feature_comparison));

    let book_routes = Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route("/genres", get(books::list_genres))
        .route(
            "/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .nest("/api/v1/pricing", pricing_routes)
        .nest("/api/v1/books", book_routes)
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state)
        // Swagger UI
        .merge(swagger_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
