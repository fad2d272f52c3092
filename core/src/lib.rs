//! Core of the greeter widget.
//!
//! A greeter shows a name input, a greeting and a click counter. This crate holds
//! everything that does not depend on where the widget is displayed:
//!
//! - [`WidgetState`] and its sanitising rules,
//! - the pure [`render`] template producing a [`Node`] forest,
//! - [`diff`] for hosts that patch instead of replacing,
//! - the [`Greeter`] controller tying state, rendering and notifications together
//!   through the [`Surface`] and [`EventSink`] seams.
//!
//! ```
//! use greeter_core::{GreetEvent, Greeter, GreeterConfig, MemorySurface};
//!
//! let mut greeter = Greeter::new(GreeterConfig::default(), MemorySurface::new(), Vec::<GreetEvent>::new());
//! greeter.set_display_name("Ann");
//! let event = greeter.handle_greet_action();
//! assert_eq!(event.composed_message, "Hello, Ann! (Click #1)");
//! ```

pub mod config;
pub mod diff;
mod error;
pub mod event;
mod greeter;
pub mod node;
mod state;
pub mod template;

#[cfg(test)]
mod tests;

pub use config::{
    GreeterConfig, GreeterConfigBuilder, HostAttributes, Locale, Messages, RenderStrategy, Variant,
};
pub use diff::{Patch, diff};
pub use error::GreeterError;
pub use event::{Discard, EventSink, GREET_EVENT, GreetEvent};
pub use greeter::{Greeter, MemorySurface, Paint, Surface};
pub use node::{Element, Node, to_html};
pub use state::{WidgetState, parse_count};
pub use template::{GREET_BUTTON_ID, NAME_INPUT_ID, render};
