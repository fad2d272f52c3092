//! A minimal virtual DOM.
//!
//! Templates produce a forest of [`Node`]s. Hosts either serialise it to markup
//! ([`to_html`]) or diff two forests ([`crate::diff`]) and patch the difference.

use core::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in declaration order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// In-place form of [`Element::attr`].
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Shorthand for the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Shorthand for the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Appends a child node.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Looks up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this element is serialised without a closing tag.
    #[must_use]
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Node {
    /// Returns the element if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for an element with the given `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let element = self.as_element()?;
        if element.attribute("id") == Some(id) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find_by_id(id))
    }

    /// Depth-first search for the first element with the given class.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        let element = self.as_element()?;
        let matches = element
            .attribute("class")
            .is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class));
        if matches {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_class(class))
    }

    /// Appends the markup for this node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_into(out, text, false),
            Self::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                out.push('>');
                if element.is_void() {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Serialises a forest to markup.
#[must_use]
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

fn escape_into(out: &mut String, raw: &str, attribute: bool) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, Node, to_html};

    fn node_at<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Node> {
        let (first, rest) = path.split_first()?;
        let mut node = nodes.get(*first)?;
        for index in rest {
            node = node.as_element()?.children.get(*index)?;
        }
        Some(node)
    }

    #[test]
    fn serialises_nested_elements() {
        let tree = vec![Node::from(
            Element::new("div")
                .class("greeting")
                .text("Hello, ")
                .child(Element::new("strong").text("Ann"))
                .text("!"),
        )];
        assert_eq!(
            to_html(&tree),
            r#"<div class="greeting">Hello, <strong>Ann</strong>!</div>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let tree = vec![Node::from(
            Element::new("input").attr("value", r#"<b>"x" & y</b>"#),
        )];
        assert_eq!(
            to_html(&tree),
            r#"<input value="&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;">"#
        );
        let text = vec![Node::from("<script>")];
        assert_eq!(to_html(&text), "&lt;script&gt;");
    }

    #[test]
    fn later_attribute_wins() {
        let element = Element::new("p").class("a").class("b");
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.attribute("class"), Some("b"));
    }

    #[test]
    fn finds_nodes_by_path_id_and_class() {
        let tree = vec![
            Node::from(Element::new("h3").text("title")),
            Node::from(
                Element::new("div")
                    .class("controls row")
                    .child(Element::new("button").id("greetBtn").text("Go")),
            ),
        ];
        assert_eq!(
            node_at(&tree, &[1, 0, 0]),
            Some(&Node::Text("Go".into()))
        );
        assert!(node_at(&tree, &[2]).is_none());
        assert!(node_at(&tree, &[]).is_none());
        assert_eq!(tree[1].find_by_id("greetBtn").unwrap().tag, "button");
        assert_eq!(tree[1].find_by_class("row").unwrap().tag, "div");
        assert_eq!(tree[1].text_content(), "Go");
    }
}
