//! Outbound notifications.

use serde::{Deserialize, Serialize};

use crate::config::Variant;

/// Name of the DOM event dispatched on every greet action.
pub const GREET_EVENT: &str = "greet";

/// Payload carried by a [`GREET_EVENT`] notification.
///
/// Serialises with camel-cased keys so it can be used directly as a
/// `CustomEvent` detail object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetEvent {
    /// The greeted name at the time of the click.
    pub display_name: String,
    /// The post-increment click count.
    pub click_count: u64,
    /// Human readable message, e.g. `Hello, Ann! (Click #2)`.
    pub composed_message: String,
    /// Which implementation produced the event.
    pub variant: Variant,
}

/// Receiver for outbound notifications.
///
/// Hosts implement this to forward events into their environment: the web backend
/// dispatches a bubbling `CustomEvent`, the terminal backend prints a status line.
pub trait EventSink {
    /// Delivers one notification. Called exactly once per accepted click.
    fn emit(&mut self, event: &GreetEvent);
}

impl EventSink for Vec<GreetEvent> {
    fn emit(&mut self, event: &GreetEvent) {
        self.push(event.clone());
    }
}

/// A sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &GreetEvent) {}
}
