use crate::error::WebError;

use greeter_core::Variant;

use wasm_bindgen::JsCast;

use web_sys::{Document, Element, HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

const REACTIVE_CSS: &str = include_str!("../styles/reactive.css");
const VANILLA_CSS: &str = include_str!("../styles/vanilla.css");

/// The encapsulated DOM owned by one greeter element.
///
/// Layout inside the open shadow root: a `<style>` element with the variant's
/// skin followed by a container `<div>` that renders go into. The container
/// is what [`crate::WebSurface`] addresses patch paths against.
#[derive(Debug, Clone)]
pub struct ShadowHost {
    document: Document,
    shadow: ShadowRoot,
    container: Element,
}

impl ShadowHost {
    /// Attaches an open shadow root to `host` and injects the variant's stylesheet.
    pub fn attach(host: &HtmlElement, variant: Variant) -> Result<Self, WebError> {
        let document = host
            .owner_document()
            .or_else(|| web_sys::window().and_then(|window| window.document()))
            .ok_or(WebError::DomUnavailable)?;

        let shadow = match host.shadow_root() {
            Some(existing) => existing,
            None => host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?,
        };

        let style = document.create_element("style")?;
        style.set_attribute("data-greeter", variant.as_str())?;
        style.set_text_content(Some(stylesheet(variant)));
        shadow.append_child(&style)?;

        let container = document.create_element("div")?;
        container.set_class_name("greeter-root");
        shadow.append_child(&container)?;

        Ok(Self {
            document,
            shadow,
            container,
        })
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the shadow root.
    #[must_use]
    pub const fn shadow(&self) -> &ShadowRoot {
        &self.shadow
    }

    /// Returns the element renders are mounted under.
    #[must_use]
    pub const fn container(&self) -> &Element {
        &self.container
    }

    /// Looks up an element inside the shadow tree by id.
    pub fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.shadow
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    /// Returns the `id` of the focused element inside the shadow tree, if any.
    pub fn focused_id(&self) -> Option<String> {
        self.shadow
            .active_element()
            .map(|element| element.id())
            .filter(|id| !id.is_empty())
    }
}

const fn stylesheet(variant: Variant) -> &'static str {
    match variant {
        Variant::Reactive => REACTIVE_CSS,
        Variant::Vanilla => VANILLA_CSS,
    }
}
