#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Browser custom elements for the greeter widget.
//!
//! Call [`define_greeters`] (exported to JavaScript as `defineGreeters`) once and
//! use the tags in markup:
//!
//! ```html
//! <reactive-greeter name="Ann" lang="es"></reactive-greeter>
//! <vanilla-greeter count="3">Extra content for the slot</vanilla-greeter>
//! ```
//!
//! Each element owns an open shadow root. `reactive-greeter` patches only the
//! nodes that changed; `vanilla-greeter` rewrites its markup on every render.
//! Both bind their `input` and `click` listeners once on the shadow root and
//! dispatch a bubbling, composed `greet` event per click.

mod app;
mod dom;
mod element;
mod error;
mod renderer;

pub use app::{GreeterDefinition, define_greeter, define_greeters};
pub use dom::ShadowHost;
pub use element::{GreeterHandle, OBSERVED_ATTRIBUTES};
pub use error::WebError;
pub use renderer::WebSurface;
