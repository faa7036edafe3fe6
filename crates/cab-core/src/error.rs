//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CabError` as one variant
//! where they need to surface configuration or coordinate problems.

use thiserror::Error;

/// The error type for `cab-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CabError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Shorthand result type for `cab-core`.
pub type CabResult<T> = Result<T, CabError>;
