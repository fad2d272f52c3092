use core::fmt;

use greeter_core::GreeterError;

/// Error type produced by the web backend.
#[derive(Debug, Clone)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// A patch addressed a node that is not in the shadow tree.
    NodeNotFound(Vec<usize>),
    /// The instance configuration could not be interpreted.
    Config(String),
    /// A notification payload could not be converted for JavaScript.
    Payload(String),
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::NodeNotFound(path) => write!(f, "no DOM node at path {path:?}"),
            Self::Config(msg) => write!(f, "invalid greeter configuration: {msg}"),
            Self::Payload(msg) => write!(f, "failed to encode event payload: {msg}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<GreeterError> for WebError {
    fn from(value: GreeterError) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<serde_json::Error> for WebError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value.to_string())
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        match value {
            WebError::Js(msg) => Self::from(msg),
            other => Self::from(other.to_string()),
        }
    }
}
