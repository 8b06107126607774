//! Shared error type.
//!
//! Sub-crates define their own error enums and convert `EvError` into them
//! via `#[from]` where a core error can surface through their API.

use thiserror::Error;

/// The top-level error type for `evc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parameter `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Shorthand result type for `evc-core`.
pub type EvResult<T> = Result<T, EvError>;
