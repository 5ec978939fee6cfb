//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the server lifecycle:
//! metrics recorder, book store, pricing catalog, REST API, and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::application::{BookService, PricingService};
use crate::config::AppConfig;
use crate::domain::book::BookRepository;
use crate::infrastructure::InMemoryBookRepository;
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::errors::AppError;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Prometheus ─────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process.
/// A restart within the same process reuses the first handle.
fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                // Another recorder owns the process; keep a detached one so
                // /metrics still answers.
                warn!("Prometheus recorder not installed: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running Bookshelf service.
///
/// # Examples
///
/// ```rust,no_run
/// use bookshelf::config::AppConfig;
/// use bookshelf::server::ServerHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,
    /// Book service backing the API.
    pub books: Arc<BookService>,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given configuration.
    ///
    /// 1. Install the Prometheus metrics recorder
    /// 2. Build the pricing catalog from `[pricing]`
    /// 3. Create the book store (optionally seeded)
    /// 4. Bind and serve the REST API (with Swagger UI)
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        info!("Starting Bookshelf service...");

        let prometheus = prometheus_handle();

        // ── Pricing ────────────────────────────────────────────
        let pricing = config.pricing_service()?;
        info!(
            tiers = pricing.tiers().len(),
            currency = %pricing.currency(),
            "Pricing catalog loaded"
        );

        // ── Books ──────────────────────────────────────────────
        let repo: Arc<dyn BookRepository> = if config.books.seed_demo_data {
            Arc::new(InMemoryBookRepository::with_demo_books())
        } else {
            Arc::new(InMemoryBookRepository::new())
        };
        let books = BookService::new(repo);

        // ── REST API server ────────────────────────────────────
        let state = AppState::new(pricing, books, prometheus);
        let books = Arc::clone(&state.books);
        let api_router = create_api_router(state);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            config,
            local_addr,
            books,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("REST API server did not stop within {:?}, aborting", timeout);
                api_task.abort();
            }
        }

        info!("👋 Bookshelf service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down Bookshelf service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config
    }

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_shuts_down() {
        let handle = ServerHandle::start(test_config()).await.unwrap();
        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());
        assert_eq!(handle.books.count_books().await.unwrap(), 5);

        let stream = tokio::net::TcpStream::connect(handle.local_addr).await;
        assert!(stream.is_ok());

        let signal = handle.shutdown_signal();
        handle.shutdown().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn empty_store_when_seeding_disabled() {
        let mut config = test_config();
        config.books.seed_demo_data = false;
        let handle = ServerHandle::start(config).await.unwrap();
        assert_eq!(handle.books.count_books().await.unwrap(), 0);
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_pricing_config_fails_start() {
        let mut config = test_config();
        config.pricing.support_add_on_yearly = rust_decimal::Decimal::from(-5);
        let err = ServerHandle::start(config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
