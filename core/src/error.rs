//! Error types for host-side plumbing.
//!
//! Widget operations themselves never fail; these errors only arise while
//! interpreting configuration supplied by a host.

use thiserror::Error;

/// Errors produced while configuring a greeter.
#[derive(Debug, Error)]
pub enum GreeterError {
    /// The variant name is not one of `reactive` or `vanilla`.
    #[error("unknown greeter variant `{0}`")]
    UnknownVariant(String),
    /// The locale tag has no message catalogue.
    #[error("unsupported locale `{0}`")]
    UnknownLocale(String),
    /// A JSON configuration document could not be decoded.
    #[error("invalid greeter configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
