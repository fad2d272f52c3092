//! The greeter controller: state → render → listen → emit.
//!
//! State lives in a single [`nami`] binding. A watcher registered at
//! construction repaints synchronously on every write, so the displayed tree is
//! always consistent with the state before a handler returns. Hosts plug in
//! through two seams: a [`Surface`] that receives paints and an [`EventSink`]
//! that receives notifications.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use nami::{Binding, Signal, binding};
use tracing::{debug, error, info};

use crate::config::{GreeterConfig, RenderStrategy};
use crate::diff::{self, Patch, diff};
use crate::event::{EventSink, GreetEvent};
use crate::node::Node;
use crate::state::WidgetState;
use crate::template::{self, NAME_INPUT_ID};

/// Where a greeter's visual tree is displayed.
pub trait Surface {
    /// Replaces everything currently shown with `tree`.
    fn replace(&mut self, tree: &[Node]);
    /// Applies incremental changes to what is currently shown.
    fn patch(&mut self, patches: &[Patch]);
    /// Moves input focus to the element with `element_id`.
    ///
    /// Returns `false` when no such element is displayed.
    fn focus(&mut self, element_id: &str) -> bool;
}

/// What a single paint did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// The whole tree was handed to [`Surface::replace`].
    Replaced,
    /// This many patches were computed; zero means the surface was left untouched.
    Patched(usize),
}

struct Painter<S> {
    surface: S,
    config: Rc<GreeterConfig>,
    mounted: Option<Vec<Node>>,
    last_state: Option<WidgetState>,
    last_paint: Option<Paint>,
    paints: usize,
}

impl<S: Surface> Painter<S> {
    const fn new(surface: S, config: Rc<GreeterConfig>) -> Self {
        Self {
            surface,
            config,
            mounted: None,
            last_state: None,
            last_paint: None,
            paints: 0,
        }
    }

    fn paint(&mut self, state: &WidgetState) -> Paint {
        let tree = template::render(state, &self.config);
        let paint = match (self.config.variant.strategy(), self.mounted.as_deref()) {
            (RenderStrategy::Patch, Some(previous)) => {
                let patches = diff(previous, &tree);
                if !patches.is_empty() {
                    self.surface.patch(&patches);
                }
                Paint::Patched(patches.len())
            }
            _ => {
                self.surface.replace(&tree);
                Paint::Replaced
            }
        };

        let changed = changed_properties(self.last_state.as_ref(), state);
        if !changed.is_empty() {
            debug!(
                variant = %self.config.variant,
                name = %state.display_name,
                count = state.click_count,
                changed = ?changed,
                "greeter updated"
            );
        }

        self.mounted = Some(tree);
        self.last_state = Some(state.clone());
        self.last_paint = Some(paint);
        self.paints += 1;
        paint
    }
}

fn changed_properties(before: Option<&WidgetState>, after: &WidgetState) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if before.is_none_or(|b| b.display_name != after.display_name) {
        changed.push("displayName");
    }
    if before.is_none_or(|b| b.click_count != after.click_count) {
        changed.push("clickCount");
    }
    changed
}

/// One greeter widget instance.
pub struct Greeter<S, E> {
    config: Rc<GreeterConfig>,
    state: Binding<WidgetState>,
    painter: Rc<RefCell<Painter<S>>>,
    sink: E,
    attached: bool,
    _watcher: <Binding<WidgetState> as Signal>::Guard,
}

impl<S, E> fmt::Debug for Greeter<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Greeter")
            .field("variant", &self.config.variant)
            .field("state", &self.state.get())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl<S: Surface + 'static, E: EventSink> Greeter<S, E> {
    /// Creates a greeter and paints it onto `surface` immediately.
    pub fn new(config: GreeterConfig, surface: S, sink: E) -> Self {
        let config = Rc::new(config);
        let initial = WidgetState {
            display_name: config.starting_name(),
            click_count: config.initial_count,
        };

        let painter = Rc::new(RefCell::new(Painter::new(surface, Rc::clone(&config))));
        painter.borrow_mut().paint(&initial);

        let state: Binding<WidgetState> = binding(initial);
        let watcher = {
            let painter = Rc::clone(&painter);
            state.watch(move |context| {
                let state = context.into_value();
                match painter.try_borrow_mut() {
                    Ok(mut painter) => {
                        painter.paint(&state);
                    }
                    Err(_) => error!("greeter repaint skipped: surface is busy"),
                }
            })
        };

        Self {
            config,
            state,
            painter,
            sink,
            attached: false,
            _watcher: watcher,
        }
    }

    /// Replaces the display name; blank input falls back to the configured default.
    pub fn set_display_name(&self, name: &str) {
        let mut state = self.state.get();
        state.display_name =
            WidgetState::sanitize_name(name, self.config.messages.fallback_name());
        self.state.set(state);
    }

    /// Handles one click: increments the count, repaints, then emits exactly one
    /// notification carrying the post-increment state.
    pub fn handle_greet_action(&mut self) -> GreetEvent {
        let mut state = self.state.get();
        state.click_count = state.next_count();
        let event = GreetEvent {
            composed_message: self
                .config
                .messages
                .composed_message(&state.display_name, state.click_count),
            display_name: state.display_name.clone(),
            click_count: state.click_count,
            variant: self.config.variant,
        };
        self.state.set(state);
        self.sink.emit(&event);
        event
    }

    /// The widget's visual tree for the current state. Does not touch the surface.
    #[must_use]
    pub fn render(&self) -> Vec<Node> {
        template::render(&self.state.get(), &self.config)
    }

    /// Pushes the current state to the surface through the variant's strategy.
    ///
    /// With unchanged state the patch strategy computes zero patches.
    pub fn repaint(&self) -> Paint {
        let state = self.state.get();
        self.painter.borrow_mut().paint(&state)
    }

    /// Moves focus to the name input. Returns `false` if it is not displayed.
    pub fn focus_name_input(&self) -> bool {
        self.painter
            .try_borrow_mut()
            .is_ok_and(|mut painter| painter.surface.focus(NAME_INPUT_ID))
    }

    /// Lifecycle hook: the widget was inserted into its host.
    pub fn on_attach(&mut self) {
        self.attached = true;
        info!(variant = %self.config.variant, "greeter attached");
    }

    /// Lifecycle hook: the widget was removed from its host.
    pub fn on_detach(&mut self) {
        self.attached = false;
        info!(variant = %self.config.variant, "greeter detached");
    }
}

impl<S, E> Greeter<S, E> {
    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state.get()
    }

    /// Configuration this instance was built with.
    #[must_use]
    pub fn config(&self) -> &GreeterConfig {
        &self.config
    }

    /// Whether [`Greeter::on_attach`] ran more recently than [`Greeter::on_detach`].
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// The notification sink.
    #[must_use]
    pub const fn sink(&self) -> &E {
        &self.sink
    }

    /// Mutable access to the notification sink, e.g. to drain queued events.
    #[allow(clippy::missing_const_for_fn)]
    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Outcome of the most recent paint.
    #[must_use]
    pub fn last_paint(&self) -> Option<Paint> {
        self.painter.borrow().last_paint
    }

    /// Number of paints so far, including the initial one.
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.painter.borrow().paints
    }

    /// Runs `f` with the surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.painter.borrow().surface)
    }

    /// Runs `f` with mutable access to the surface.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.painter.borrow_mut().surface)
    }
}

/// A [`Surface`] that keeps the displayed tree in memory.
///
/// Used by hosts without a DOM and by tests. It records how it was updated so
/// callers can tell full replaces from patches.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    tree: Vec<Node>,
    focused: Option<String>,
    replaces: usize,
    patches: usize,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree currently displayed.
    #[must_use]
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    /// Concatenated text of the displayed tree.
    #[must_use]
    pub fn text(&self) -> String {
        self.tree.iter().map(Node::text_content).collect()
    }

    /// `id` of the focused element, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// How many times the whole tree was replaced.
    #[must_use]
    pub const fn replace_count(&self) -> usize {
        self.replaces
    }

    /// How many individual patches were applied.
    #[must_use]
    pub const fn patch_count(&self) -> usize {
        self.patches
    }

    /// Clears the displayed tree, as if the host dropped its content.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.focused = None;
    }
}

impl Surface for MemorySurface {
    fn replace(&mut self, tree: &[Node]) {
        self.tree = tree.to_vec();
        self.replaces += 1;
    }

    fn patch(&mut self, patches: &[Patch]) {
        diff::apply(&mut self.tree, patches);
        self.patches += patches.len();
    }

    fn focus(&mut self, element_id: &str) -> bool {
        let present = self
            .tree
            .iter()
            .any(|node| node.find_by_id(element_id).is_some());
        if present {
            self.focused = Some(element_id.to_owned());
        }
        present
    }
}
