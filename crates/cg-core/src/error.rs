//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CgError` as one
//! variant via `#[from]`, so configuration problems surface unchanged at
//! every layer.

use thiserror::Error;

/// The top-level error type for `cg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CgError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `cg-*` crates.
pub type CgResult<T> = Result<T, CgError>;
