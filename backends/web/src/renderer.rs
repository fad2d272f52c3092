use greeter_core::{Node, Patch, RenderStrategy, Surface, to_html};

use tracing::{debug, error};

use wasm_bindgen::JsCast;

use web_sys::{Document, Element, HtmlInputElement};

use crate::{dom::ShadowHost, error::WebError};

/// A [`Surface`] backed by a shadow root.
///
/// Full-replace renders rewrite the container's markup. Patch renders build DOM
/// nodes directly so every virtual node maps to exactly one DOM node, which keeps
/// patch paths valid even where markup parsing would merge adjacent text.
#[derive(Debug, Clone)]
pub struct WebSurface {
    host: ShadowHost,
    strategy: RenderStrategy,
}

impl WebSurface {
    /// Creates a surface rendering into `host` with the given strategy.
    #[must_use]
    pub const fn new(host: ShadowHost, strategy: RenderStrategy) -> Self {
        Self { host, strategy }
    }

    /// Returns the shadow host this surface renders into.
    #[must_use]
    pub const fn host(&self) -> &ShadowHost {
        &self.host
    }

    fn replace_markup(&self, tree: &[Node]) {
        let focus = self.capture_focus();
        self.host.container().set_inner_html(&to_html(tree));
        if let Some(focus) = focus {
            focus.restore(&self.host);
        }
    }

    fn replace_nodes(&self, tree: &[Node]) -> Result<(), WebError> {
        let container = self.host.container();
        while let Some(child) = container.first_child() {
            container.remove_child(&child)?;
        }
        for node in tree {
            container.append_child(&build_node(self.host.document(), node)?)?;
        }
        Ok(())
    }

    fn capture_focus(&self) -> Option<FocusSnapshot> {
        let id = self.host.focused_id()?;
        let selection = self
            .host
            .element_by_id(&id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| {
                let start = input.selection_start().ok().flatten()?;
                let end = input.selection_end().ok().flatten()?;
                Some((start, end))
            });
        Some(FocusSnapshot { id, selection })
    }

    fn resolve(&self, path: &[usize]) -> Result<web_sys::Node, WebError> {
        let mut current: web_sys::Node = self.host.container().clone().into();
        for index in path {
            let child = u32::try_from(*index)
                .ok()
                .and_then(|index| current.child_nodes().item(index))
                .ok_or_else(|| WebError::NodeNotFound(path.to_vec()))?;
            current = child;
        }
        Ok(current)
    }

    fn resolve_element(&self, path: &[usize]) -> Result<Element, WebError> {
        self.resolve(path)?
            .dyn_into::<Element>()
            .map_err(|_| WebError::NodeNotFound(path.to_vec()))
    }

    fn apply(&self, patch: &Patch) -> Result<(), WebError> {
        match patch {
            Patch::SetText { path, text } => {
                self.resolve(path)?.set_text_content(Some(text));
            }
            Patch::SetAttribute { path, name, value } => {
                let element = self.resolve_element(path)?;
                element.set_attribute(name, value)?;
                sync_input_value(&element, name, value);
            }
            Patch::RemoveAttribute { path, name } => {
                self.resolve_element(path)?.remove_attribute(name)?;
            }
            Patch::Replace { path, node } => {
                let old = self.resolve(path)?;
                let parent = old
                    .parent_node()
                    .ok_or_else(|| WebError::NodeNotFound(path.to_vec()))?;
                parent.replace_child(&build_node(self.host.document(), node)?, &old)?;
            }
            Patch::Append { parent, node } => {
                let parent = self.resolve(parent)?;
                parent.append_child(&build_node(self.host.document(), node)?)?;
            }
            Patch::Remove { path } => {
                let old = self.resolve(path)?;
                if let Some(parent) = old.parent_node() {
                    parent.remove_child(&old)?;
                }
            }
        }
        Ok(())
    }
}

impl Surface for WebSurface {
    fn replace(&mut self, tree: &[Node]) {
        match self.strategy {
            RenderStrategy::FullReplace => self.replace_markup(tree),
            RenderStrategy::Patch => {
                if let Err(err) = self.replace_nodes(tree) {
                    error!(error = %err, "failed to mount greeter tree");
                }
            }
        }
    }

    fn patch(&mut self, patches: &[Patch]) {
        debug!(patches = patches.len(), "patching greeter shadow tree");
        for patch in patches {
            if let Err(err) = self.apply(patch) {
                error!(error = %err, path = ?patch.path(), "failed to apply patch");
            }
        }
    }

    fn focus(&mut self, element_id: &str) -> bool {
        self.host
            .element_by_id(element_id)
            .is_some_and(|element| element.focus().is_ok())
    }
}

struct FocusSnapshot {
    id: String,
    selection: Option<(u32, u32)>,
}

impl FocusSnapshot {
    fn restore(self, host: &ShadowHost) {
        let Some(element) = host.element_by_id(&self.id) else {
            return;
        };
        if element.focus().is_err() {
            return;
        }
        if let (Some((start, end)), Ok(input)) =
            (self.selection, element.dyn_into::<HtmlInputElement>())
        {
            let _ = input.set_selection_range(start, end);
        }
    }
}

/// The `value` attribute only seeds an input; the live value is a property.
fn sync_input_value(element: &Element, name: &str, value: &str) {
    if name != "value" {
        return;
    }
    if let Some(input) = element.dyn_ref::<HtmlInputElement>()
        && input.value() != value
    {
        input.set_value(value);
    }
}

fn build_node(document: &Document, node: &Node) -> Result<web_sys::Node, WebError> {
    match node {
        Node::Text(text) => Ok(document.create_text_node(text).into()),
        Node::Element(element) => {
            let built = document.create_element(&element.tag)?;
            for (name, value) in &element.attributes {
                built.set_attribute(name, value)?;
            }
            for child in &element.children {
                built.append_child(&build_node(document, child)?)?;
            }
            Ok(built.into())
        }
    }
}
