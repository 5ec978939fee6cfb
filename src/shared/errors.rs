use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn book_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Book",
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Rejections raised while building a tier catalog.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("Rate '{field}' must be non-negative, got {value}")]
    NegativeRate { field: &'static str, value: Decimal },

    #[error("Rate '{field}' must not exceed {max}, got {value}")]
    RateTooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    #[error("Tier name cannot be empty")]
    EmptyTierName,

    #[error("Duplicate tier name: {0}")]
    DuplicateTier(String),

    #[error("Tier catalog must contain at least one tier")]
    EmptyCatalog,

    #[error("Unknown tier: {0}")]
    UnknownTier(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] PricingError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
