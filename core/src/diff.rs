//! Tree diffing for the patch rendering strategy.
//!
//! Nodes are addressed by child-index paths from the root forest, e.g. `[1, 0]` is
//! the first child of the second root node. Patches are ordered so that applying
//! them front to back keeps every later path valid: removals of surplus children
//! run from the last index down.

use crate::node::{Element, Node};

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace the text of a text node.
    SetText {
        /// Target node.
        path: Vec<usize>,
        /// New content.
        text: String,
    },
    /// Add or change an attribute.
    SetAttribute {
        /// Target element.
        path: Vec<usize>,
        /// Attribute name.
        name: String,
        /// New value.
        value: String,
    },
    /// Drop an attribute.
    RemoveAttribute {
        /// Target element.
        path: Vec<usize>,
        /// Attribute name.
        name: String,
    },
    /// Swap a node for a freshly built one.
    Replace {
        /// Target node.
        path: Vec<usize>,
        /// Replacement subtree.
        node: Node,
    },
    /// Append a child. An empty `parent` path means the root forest.
    Append {
        /// Parent element.
        parent: Vec<usize>,
        /// New child.
        node: Node,
    },
    /// Remove a node.
    Remove {
        /// Target node.
        path: Vec<usize>,
    },
}

impl Patch {
    /// Path of the node this patch touches (the parent for [`Patch::Append`]).
    #[must_use]
    pub fn path(&self) -> &[usize] {
        match self {
            Self::SetText { path, .. }
            | Self::SetAttribute { path, .. }
            | Self::RemoveAttribute { path, .. }
            | Self::Replace { path, .. }
            | Self::Remove { path } => path,
            Self::Append { parent, .. } => parent,
        }
    }
}

/// Computes the patches that turn `old` into `new`.
///
/// Identical forests yield no patches.
#[must_use]
pub fn diff(old: &[Node], new: &[Node]) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut path = Vec::new();
    diff_children(old, new, &mut path, &mut patches);
    patches
}

fn diff_children(old: &[Node], new: &[Node], path: &mut Vec<usize>, out: &mut Vec<Patch>) {
    for (index, (before, after)) in old.iter().zip(new).enumerate() {
        path.push(index);
        diff_node(before, after, path, out);
        path.pop();
    }
    for node in new.iter().skip(old.len()) {
        out.push(Patch::Append {
            parent: path.clone(),
            node: node.clone(),
        });
    }
    for index in (new.len()..old.len()).rev() {
        let mut target = path.clone();
        target.push(index);
        out.push(Patch::Remove { path: target });
    }
}

fn diff_node(old: &Node, new: &Node, path: &mut Vec<usize>, out: &mut Vec<Patch>) {
    if old == new {
        return;
    }
    match (old, new) {
        (Node::Text(_), Node::Text(text)) => out.push(Patch::SetText {
            path: path.clone(),
            text: text.clone(),
        }),
        (Node::Element(before), Node::Element(after)) if before.tag == after.tag => {
            diff_attributes(before, after, path, out);
            diff_children(&before.children, &after.children, path, out);
        }
        _ => out.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_attributes(old: &Element, new: &Element, path: &[usize], out: &mut Vec<Patch>) {
    for (name, value) in &new.attributes {
        if old.attribute(name) != Some(value.as_str()) {
            out.push(Patch::SetAttribute {
                path: path.to_vec(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    for (name, _) in &old.attributes {
        if new.attribute(name).is_none() {
            out.push(Patch::RemoveAttribute {
                path: path.to_vec(),
                name: name.clone(),
            });
        }
    }
}

/// Applies patches to an in-memory forest.
///
/// Hosts without a real DOM use this to keep a mirror of what is displayed.
/// Patches whose path no longer resolves are skipped.
pub fn apply(tree: &mut Vec<Node>, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::Append { parent, node } => {
                if let Some(children) = children_mut(tree, parent) {
                    children.push(node.clone());
                }
            }
            Patch::Remove { path } => {
                if let Some((last, parent)) = path.split_last()
                    && let Some(children) = children_mut(tree, parent)
                    && *last < children.len()
                {
                    children.remove(*last);
                }
            }
            Patch::SetText { path, text } => {
                if let Some(Node::Text(current)) = node_mut(tree, path) {
                    current.clone_from(text);
                }
            }
            Patch::SetAttribute { path, name, value } => {
                if let Some(Node::Element(element)) = node_mut(tree, path) {
                    element.set_attribute(name.clone(), value.clone());
                }
            }
            Patch::RemoveAttribute { path, name } => {
                if let Some(Node::Element(element)) = node_mut(tree, path) {
                    element.attributes.retain(|(n, _)| n != name);
                }
            }
            Patch::Replace { path, node } => {
                if let Some(target) = node_mut(tree, path) {
                    *target = node.clone();
                }
            }
        }
    }
}

fn children_mut<'a>(tree: &'a mut Vec<Node>, path: &[usize]) -> Option<&'a mut Vec<Node>> {
    if path.is_empty() {
        return Some(tree);
    }
    match node_mut(tree, path)? {
        Node::Element(element) => Some(&mut element.children),
        Node::Text(_) => None,
    }
}

fn node_mut<'a>(tree: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = tree.get_mut(*first)?;
    for index in rest {
        node = match node {
            Node::Element(element) => element.children.get_mut(*index)?,
            Node::Text(_) => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::{Patch, apply, diff};
    use crate::node::{Element, Node};

    fn greeting(name: &str) -> Vec<Node> {
        vec![Node::from(
            Element::new("div")
                .class("greeting")
                .text("Hello, ")
                .child(Element::new("strong").text(name))
                .text("!"),
        )]
    }

    #[test]
    fn identical_trees_need_no_patches() {
        assert!(diff(&greeting("Ann"), &greeting("Ann")).is_empty());
    }

    #[test]
    fn changed_text_is_patched_in_place() {
        assert_eq!(
            diff(&greeting("Ann"), &greeting("Bob")),
            vec![Patch::SetText {
                path: vec![0, 1, 0],
                text: "Bob".into(),
            }]
        );
    }

    #[test]
    fn attributes_are_set_and_removed() {
        let old = vec![Node::from(Element::new("input").attr("value", "a").attr("hidden", ""))];
        let new = vec![Node::from(Element::new("input").attr("value", "b"))];
        assert_eq!(
            diff(&old, &new),
            vec![
                Patch::SetAttribute {
                    path: vec![0],
                    name: "value".into(),
                    value: "b".into(),
                },
                Patch::RemoveAttribute {
                    path: vec![0],
                    name: "hidden".into(),
                },
            ]
        );
    }

    #[test]
    fn tag_changes_replace_the_node() {
        let old = vec![Node::from(Element::new("em").text("hint"))];
        let new = vec![Node::from(Element::new("strong").text("hint"))];
        assert!(matches!(
            diff(&old, &new).as_slice(),
            [Patch::Replace { path, .. }] if path == &[0]
        ));
    }

    #[test]
    fn surplus_children_are_removed_back_to_front() {
        let old = vec![Node::from("a"), Node::from("b"), Node::from("c")];
        let new = vec![Node::from("a")];
        assert_eq!(
            diff(&old, &new),
            vec![Patch::Remove { path: vec![2] }, Patch::Remove { path: vec![1] }]
        );
    }

    #[test]
    fn applying_a_diff_reproduces_the_target() {
        let old = vec![
            Node::from(Element::new("ul").child(Element::new("li").text("one"))),
            Node::from("tail"),
        ];
        let new = vec![Node::from(
            Element::new("ul")
                .class("list")
                .child(Element::new("li").text("uno"))
                .child(Element::new("li").text("dos")),
        )];
        let mut mirror = old.clone();
        apply(&mut mirror, &diff(&old, &new));
        assert_eq!(mirror, new);
    }
}
