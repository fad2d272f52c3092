use std::cell::RefCell;
use std::sync::Once;

use greeter_core::Variant;

use tracing::{error, info};

use wasm_bindgen::{JsCast, prelude::*};

use web_sys::HtmlElement;

use crate::{
    element::{GreeterHandle, OBSERVED_ATTRIBUTES},
    error::WebError,
};

#[wasm_bindgen(inline_js = r#"
export function defineCustomElement(tag, observed, factory) {
  if (customElements.get(tag)) {
    return false;
  }
  class GreeterElement extends HTMLElement {
    static get observedAttributes() {
      return observed;
    }
    constructor() {
      super();
      this._handle = factory(this);
    }
    connectedCallback() {
      this._handle?.connected();
    }
    disconnectedCallback() {
      this._handle?.disconnected();
    }
    attributeChangedCallback(name, oldValue, newValue) {
      this._handle?.attributeChanged(name, oldValue, newValue);
    }
    focusInput() {
      return this._handle?.focusInput() ?? false;
    }
    get name() {
      return this._handle?.name();
    }
    set name(value) {
      this._handle?.setName(value ?? "");
    }
    get counter() {
      return this._handle?.counter() ?? 0;
    }
  }
  customElements.define(tag, GreeterElement);
  return true;
}
"#)]
extern "C" {
    #[wasm_bindgen(catch, js_name = defineCustomElement)]
    fn define_custom_element(
        tag: &str,
        observed: &js_sys::Array,
        factory: &js_sys::Function,
    ) -> Result<bool, JsValue>;
}

type Factory = Closure<dyn FnMut(HtmlElement) -> JsValue>;

thread_local! {
    // Element constructors call these for as long as the page lives.
    static FACTORIES: RefCell<Vec<Factory>> = const { RefCell::new(Vec::new()) };
}

static DIAGNOSTICS: Once = Once::new();

/// Installs the panic hook and routes `tracing` output to the browser console.
fn install_diagnostics() {
    DIAGNOSTICS.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = tracing_wasm::try_set_as_global_default();
    });
}

/// Builder for registering one greeter custom element.
#[derive(Debug, Clone)]
pub struct GreeterDefinition {
    variant: Variant,
    tag: Option<String>,
}

impl GreeterDefinition {
    /// Creates a definition for `variant` under its default tag name.
    #[must_use]
    pub const fn new(variant: Variant) -> Self {
        Self { variant, tag: None }
    }

    /// Registers under a custom tag name instead. It must contain a hyphen.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The tag name this definition registers.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or_else(|| self.variant.tag_name())
    }

    /// Registers the element with the page's custom element registry.
    ///
    /// Returns `false` if the tag was already defined.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry rejects the definition, e.g. for an
    /// invalid tag name.
    pub fn define(self) -> Result<bool, WebError> {
        install_diagnostics();

        let variant = self.variant;
        let factory: Factory = Closure::new(move |host: HtmlElement| {
            match GreeterHandle::new(host, variant) {
                Ok(handle) => JsValue::from(handle),
                Err(err) => {
                    error!(error = %err, %variant, "failed to set up greeter element");
                    JsValue::UNDEFINED
                }
            }
        });

        let observed: js_sys::Array = OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect();
        let defined =
            define_custom_element(self.tag(), &observed, factory.as_ref().unchecked_ref())?;
        if defined {
            info!(tag = self.tag(), %variant, "greeter element defined");
            FACTORIES.with(|factories| factories.borrow_mut().push(factory));
        }
        Ok(defined)
    }
}

/// Registers `reactive-greeter` and `vanilla-greeter`. Safe to call repeatedly.
///
/// # Errors
///
/// Returns an error if the custom element registry rejects a definition.
#[wasm_bindgen(js_name = defineGreeters)]
pub fn define_greeters() -> Result<(), WebError> {
    for variant in Variant::ALL {
        GreeterDefinition::new(variant).define()?;
    }
    Ok(())
}

/// Registers one variant (`"reactive"` or `"vanilla"`) under `tag`.
///
/// # Errors
///
/// Returns an error for an unknown variant or when the registry rejects the tag.
#[wasm_bindgen(js_name = defineGreeter)]
pub fn define_greeter(tag: &str, variant: &str) -> Result<bool, WebError> {
    let variant = variant.parse::<Variant>()?;
    GreeterDefinition::new(variant).with_tag(tag).define()
}
