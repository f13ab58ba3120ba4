//! Framework error type.
//!
//! Sub-crates define their own error enums and either wrap `HpError` or
//! convert into it via `From`, whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `hp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HpError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `hp-*` crates.
pub type HpResult<T> = Result<T, HpError>;
