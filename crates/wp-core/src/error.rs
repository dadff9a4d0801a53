//! Framework error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `SimError`) and
//! wrap `WpError` where a configuration problem needs to surface.

use thiserror::Error;

/// The top-level error type for `wp-core`.
#[derive(Debug, Error)]
pub enum WpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `wp-core`.
pub type WpResult<T> = Result<T, WpError>;
