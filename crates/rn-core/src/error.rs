//! Core error type.
//!
//! Sub-crates define their own error enums; this one only covers what the
//! core types themselves can reject.

use thiserror::Error;

/// Errors produced by `rn-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
