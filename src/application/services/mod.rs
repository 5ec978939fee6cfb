//! Application services

mod books;
mod pricing;

pub use books::BookService;
pub use pricing::PricingService;
