//! Domain layer: pure business types and rules, no I/O.

pub mod book;
pub mod pricing;

pub use book::{Book, BookChanges, BookQuery, BookRepository, Genre, NewBook, SortField, SortOrder};
pub use pricing::{BillingPeriod, Tier, TierCatalog, TierQuote, UsageSelection};

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
