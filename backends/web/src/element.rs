use std::cell::RefCell;
use std::rc::Rc;

use greeter_core::{
    GREET_BUTTON_ID, GREET_EVENT, GreetEvent, Greeter, GreeterConfig, HostAttributes,
    NAME_INPUT_ID, Variant,
};

use tracing::{error, warn};

use wasm_bindgen::{JsCast, prelude::*};

use web_sys::{CustomEvent, CustomEventInit, Element, Event, HtmlElement, HtmlInputElement};

use crate::{dom::ShadowHost, error::WebError, renderer::WebSurface};

/// Attributes whose changes are forwarded to [`GreeterHandle::attribute_changed`].
pub const OBSERVED_ATTRIBUTES: &[&str] = &["name"];

type WebGreeter = Greeter<WebSurface, Vec<GreetEvent>>;

/// Per-element state shared between the JavaScript wrapper and the DOM listeners.
#[derive(Debug)]
struct ElementState {
    host: HtmlElement,
    variant: Variant,
    shadow: ShadowHost,
    greeter: RefCell<Option<WebGreeter>>,
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl ElementState {
    /// Reads `config`, `lang`, `name` and `count` from the host element.
    ///
    /// Attributes may still be missing when the constructor runs, so this is only
    /// called once the element is connected.
    fn config(&self) -> GreeterConfig {
        let config = self.host.get_attribute("config");
        let lang = self.host.get_attribute("lang");
        let name = self.host.get_attribute("name");
        let count = self.host.get_attribute("count");
        GreeterConfig::from_attributes(
            self.variant,
            HostAttributes {
                config: config.as_deref(),
                lang: lang.as_deref(),
                name: name.as_deref(),
                count: count.as_deref(),
            },
        )
    }

    fn ensure_built(self: &Rc<Self>) -> Result<(), WebError> {
        if self.greeter.borrow().is_some() {
            return Ok(());
        }
        let config = self.config();
        let surface = WebSurface::new(self.shadow.clone(), config.variant.strategy());
        let greeter = Greeter::new(config, surface, Vec::new());
        *self.greeter.borrow_mut() = Some(greeter);
        self.bind_listeners()
    }

    /// Listeners live on the shadow root, so they survive every render of its content.
    fn bind_listeners(self: &Rc<Self>) -> Result<(), WebError> {
        let target = self.shadow.shadow();

        let weak = Rc::downgrade(self);
        let on_input = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(state) = weak.upgrade() {
                state.on_input(&event);
            }
        });
        target.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;

        let weak = Rc::downgrade(self);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(state) = weak.upgrade() {
                state.on_click(&event);
            }
        });
        target.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        self.listeners.borrow_mut().extend([on_input, on_click]);
        Ok(())
    }

    fn on_input(&self, event: &Event) {
        let Some(input) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if input.id() != NAME_INPUT_ID {
            return;
        }
        self.with_greeter(|greeter| greeter.set_display_name(&input.value()));
    }

    fn on_click(&self, event: &Event) {
        let on_button = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(&format!("#{GREET_BUTTON_ID}")).ok().flatten())
            .is_some();
        if !on_button {
            return;
        }

        // Dispatch after the borrow ends: page listeners may call back into the element.
        let pending = self
            .with_greeter(|greeter| {
                greeter.handle_greet_action();
                std::mem::take(greeter.sink_mut())
            })
            .unwrap_or_default();
        for event in &pending {
            if let Err(err) = self.dispatch(event) {
                error!(error = %err, "failed to dispatch greet event");
            }
        }
    }

    fn dispatch(&self, event: &GreetEvent) -> Result<(), WebError> {
        let detail = js_sys::JSON::parse(&serde_json::to_string(event)?)?;
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_composed(true);
        init.set_detail(&detail);
        let custom = CustomEvent::new_with_event_init_dict(GREET_EVENT, &init)?;
        self.host.dispatch_event(&custom)?;
        Ok(())
    }

    fn with_greeter<R>(&self, f: impl FnOnce(&mut WebGreeter) -> R) -> Option<R> {
        let mut slot = self
            .greeter
            .try_borrow_mut()
            .map_err(|_| warn!("re-entrant greeter call ignored"))
            .ok()?;
        slot.as_mut().map(f)
    }
}

/// The Rust half of one custom element instance.
///
/// The JavaScript element class created by [`crate::GreeterDefinition::define`]
/// holds one handle and forwards its lifecycle callbacks to it.
#[wasm_bindgen]
#[derive(Debug)]
pub struct GreeterHandle {
    state: Rc<ElementState>,
}

impl GreeterHandle {
    /// Attaches the shadow root to `host`. The widget itself is built on first connect.
    pub(crate) fn new(host: HtmlElement, variant: Variant) -> Result<Self, WebError> {
        let shadow = ShadowHost::attach(&host, variant)?;
        Ok(Self {
            state: Rc::new(ElementState {
                host,
                variant,
                shadow,
                greeter: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }
}

#[wasm_bindgen]
impl GreeterHandle {
    /// `connectedCallback`: builds and paints the widget on first connect.
    pub fn connected(&self) {
        if let Err(err) = self.state.ensure_built() {
            error!(error = %err, "failed to build greeter");
            return;
        }
        self.state.with_greeter(|greeter| greeter.on_attach());
    }

    /// `disconnectedCallback`.
    pub fn disconnected(&self) {
        self.state.with_greeter(|greeter| greeter.on_detach());
    }

    /// `attributeChangedCallback`.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(&self, name: &str, old: Option<String>, new: Option<String>) {
        if name != "name" || old == new {
            return;
        }
        self.state
            .with_greeter(|greeter| greeter.set_display_name(new.as_deref().unwrap_or_default()));
    }

    /// Moves focus to the name input. Returns `false` before the first connect.
    #[wasm_bindgen(js_name = focusInput)]
    pub fn focus_input(&self) -> bool {
        self.state
            .with_greeter(|greeter| greeter.focus_name_input())
            .unwrap_or(false)
    }

    /// Current display name.
    pub fn name(&self) -> String {
        self.state
            .with_greeter(|greeter| greeter.state().display_name)
            .unwrap_or_else(|| self.state.config().starting_name())
    }

    /// Sets the display name. Before the first connect the value is stored on the
    /// `name` attribute and picked up when the widget is built.
    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&self, value: &str) -> Result<(), WebError> {
        if self
            .state
            .with_greeter(|greeter| greeter.set_display_name(value))
            .is_none()
        {
            self.state.host.set_attribute("name", value)?;
        }
        Ok(())
    }

    /// Current click count.
    #[allow(clippy::cast_precision_loss)]
    pub fn counter(&self) -> f64 {
        self.state
            .with_greeter(|greeter| greeter.state().click_count as f64)
            .unwrap_or(0.0)
    }
}
