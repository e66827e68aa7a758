//! Error types for tokenplan.
//!
//! The pricing core itself cannot fail once it holds a validated catalog and
//! typed options. Errors come from the boundary: option strings that fall
//! outside their enumeration, malformed usage arguments, catalog data that
//! breaks the catalog invariants, and config/input plumbing.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An option value outside its closed enumeration (cadence, payment,
    /// term, strategy, discount mode). The whole computation is rejected.
    #[error("invalid {option}: '{value}' (expected one of: {expected})")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A usage argument that is not `Service=COUNT`.
    #[error("invalid usage entry '{0}': expected \"Service=COUNT\" with a non-negative integer count")]
    InvalidUsage(String),

    /// Catalog data that breaks an initialization-time invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_option(
        option: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Error::InvalidOption {
            option,
            value: value.into(),
            expected,
        }
    }
}
