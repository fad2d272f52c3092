use core::fmt;

use std::io;

/// Errors that can occur while building or running a [`TuiApp`](crate::TuiApp).
#[derive(Debug, Clone)]
pub enum TuiError {
    /// Low level terminal I/O failure.
    Io(String),
    /// The greeter could not be configured.
    Config(String),
}

impl fmt::Display for TuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) => write!(f, "terminal I/O error: {message}"),
            Self::Config(message) => write!(f, "configuration error: {message}"),
        }
    }
}

impl std::error::Error for TuiError {}

impl From<io::Error> for TuiError {
    fn from(value: io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<greeter_core::GreeterError> for TuiError {
    fn from(value: greeter_core::GreeterError) -> Self {
        Self::Config(value.to_string())
    }
}
