#![allow(clippy::multiple_crate_versions)]

//! Terminal host for the greeter widget.
//!
//! The widget renders into a [`greeter_core::MemorySurface`]; every frame walks
//! that tree and draws it with crossterm styling. Input is line based: each line
//! read from stdin becomes one [`Command`].

pub use crate::app::{Command, HELP, TuiApp, TuiAppBuilder};
pub use crate::renderer::{RenderFrame, RenderLine, RenderSegment, Renderer};
pub use crate::terminal::Terminal;

mod app;
mod error;
mod renderer;
mod terminal;

pub use error::TuiError;
