#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

pub use greeter_core::{
    Discard, Element, EventSink, GREET_BUTTON_ID, GREET_EVENT, GreetEvent, Greeter,
    GreeterConfig, GreeterConfigBuilder, GreeterError, Locale, MemorySurface, Messages,
    NAME_INPUT_ID, Node, Paint, Patch, RenderStrategy, Surface, Variant, WidgetState, diff,
    parse_count, render, to_html,
};

pub use nami as reactive;
pub use tracing as log;

pub mod prelude {
    //! Commonly used types for hosting a greeter.
    //!
    //! ```rust
    //! use greeter::prelude::*;
    //!
    //! let config = GreeterConfig::builder().locale(Locale::Spanish).build();
    //! let greeter = Greeter::new(config, MemorySurface::new(), Discard);
    //! assert!(greeter.with_surface(MemorySurface::text).contains("¡Hola, Mundo!"));
    //! ```
    pub use super::{
        Discard, EventSink, GreetEvent, Greeter, GreeterConfig, Locale, MemorySurface, Surface,
        Variant,
    };
}
