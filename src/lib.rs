//! # Bookshelf
//!
//! Reading tracker with a subscription pricing calculator.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, pricing engine and repository traits
//! - **application**: Services orchestrating the domain (books, pricing)
//! - **infrastructure**: Storage implementations
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, pagination and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
