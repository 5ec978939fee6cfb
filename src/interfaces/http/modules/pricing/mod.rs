//! Pricing module: tier catalog, quote calculator, feature comparison

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
