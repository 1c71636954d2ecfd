//! The in-memory document tree components render into.
//!
//! Nodes live in a slotmap arena and reference each other by [`NodeId`]. Removing a node removes
//! its whole subtree, including the listeners registered on it.

use std::borrow::Cow;
use std::fmt::Write;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::dom::events::DomEvent;
use crate::error_handling::log_or_panic;

new_key_type! {
    /// Handle to a node in a [`Document`].
    pub struct NodeId;
}

/// A event listener callback as stored on a element.
pub(crate) type ListenerFn = Rc<dyn Fn(&mut DomEvent)>;

/// Elements that never have children and are serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Data specific to a element node.
#[derive(Default)]
pub(crate) struct ElementData {
    /// The tag name
    tag: &'static str,
    /// Attributes in the order they were first set.
    attributes: IndexMap<&'static str, Cow<'static, str>>,
    /// Classes in the order they were added.
    classes: IndexSet<Cow<'static, str>>,
    /// Registered listeners, keyed by event name.
    listeners: SmallVec<[(&'static str, ListenerFn); 1]>,
}

/// What kind of node this is.
pub(crate) enum NodeKind {
    /// A html element
    Element(ElementData),
    /// Plain text
    Text(Cow<'static, str>),
    /// A comment, used as a placeholder while content is being rendered.
    Comment,
}

/// A single node in the tree.
pub(crate) struct Node {
    /// The node content
    kind: NodeKind,
    /// The parent, `None` for the root and for detached nodes.
    parent: Option<NodeId>,
    /// Child nodes in order.
    children: Vec<NodeId>,
}

impl Node {
    /// Create a node with no parent or children
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A tree of nodes rooted in a `<body>` element.
pub struct Document {
    /// Node arena
    nodes: SlotMap<NodeId, Node>,
    /// The `<body>` element
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only a empty `<body>`
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::new(NodeKind::Element(ElementData {
            tag: "body",
            ..ElementData::default()
        })));
        Self { nodes, body }
    }

    /// The root `<body>` element
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Does this node still exist
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A document always has a body, so this is never true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &'static str) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Element(ElementData {
            tag,
            ..ElementData::default()
        })))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: Cow<'static, str>) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Text(text)))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self) -> NodeId {
        self.nodes.insert(Node::new(NodeKind::Comment))
    }

    /// Get a element, logging if the node is missing or not a element.
    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(node).map(|node| &mut node.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            Some(_) => {
                log_or_panic!("Expected {node:?} to be a element");
                None
            }
            None => {
                log_or_panic!("Node {node:?} not found in document");
                None
            }
        }
    }

    /// Get a element, `None` if the node is missing or not a element
    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Append `child` as the last child of `parent`, detaching it from its old parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            log_or_panic!("`append_child` called with missing node");
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            log_or_panic!("Attempted to append {child:?} into its own subtree");
            return;
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Put `new` in the place of `old` and remove `old` together with its subtree.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        if !self.contains(old) || !self.contains(new) {
            log_or_panic!("`replace` called with missing node");
            return;
        }

        self.detach(new);
        let parent = self.nodes.get(old).and_then(|node| node.parent);
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                if let Some(slot) = parent_node.children.iter_mut().find(|child| **child == old) {
                    *slot = new;
                }
            }
            if let Some(node) = self.nodes.get_mut(old) {
                node.parent = None;
            }
            if let Some(node) = self.nodes.get_mut(new) {
                node.parent = Some(parent);
            }
        } else if old == self.body {
            log_or_panic!("Attempted to replace the document body");
            return;
        }

        self.remove(old);
    }

    /// Remove the node and its subtree from the document.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body {
            log_or_panic!("Attempted to remove the document body");
            return;
        }
        self.detach(node);

        let mut pending: SmallVec<[NodeId; 8]> = SmallVec::new();
        pending.push(node);
        while let Some(current) = pending.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                pending.extend(removed.children.iter().copied());
            }
        }
    }

    /// Unlink the node from its parent (if any)
    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
    }

    /// Is `ancestor` the node itself or one of its ancestors
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Set a attribute, replacing any previous value.
    pub fn set_attribute(&mut self, node: NodeId, key: &'static str, value: Cow<'static, str>) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.insert(key, value);
        }
    }

    /// Remove a attribute if present.
    pub fn remove_attribute(&mut self, node: NodeId, key: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.shift_remove(key);
        }
    }

    /// Get the value of a attribute.
    #[must_use]
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.element(node)?.attributes.get(key).map(AsRef::as_ref)
    }

    /// Add a class to the element.
    pub fn add_class(&mut self, node: NodeId, class: Cow<'static, str>) {
        if let Some(element) = self.element_mut(node) {
            element.classes.insert(class);
        }
    }

    /// Does the element have the given class.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.contains(class))
    }

    /// Register a event listener on a element.
    pub(crate) fn add_listener(&mut self, node: NodeId, event: &'static str, listener: ListenerFn) {
        if let Some(element) = self.element_mut(node) {
            element.listeners.push((event, listener));
        }
    }

    /// Clone out the listeners for the given event, in registration order.
    pub(crate) fn listeners(&self, node: NodeId, event: &str) -> SmallVec<[ListenerFn; 2]> {
        self.element(node)
            .map(|element| {
                element
                    .listeners
                    .iter()
                    .filter(|(name, _)| *name == event)
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parent of the node
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    /// Children of the node, empty if the node does not exist.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Tag of a element, `None` for text and comment nodes.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&'static str> {
        self.element(node).map(|element| element.tag)
    }

    /// The node and every ancestor, starting at the node itself.
    #[must_use]
    pub fn propagation_path(&self, node: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut path = SmallVec::new();
        let mut current = self.contains(node).then_some(node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Nearest inclusive ancestor with the given tag.
    #[must_use]
    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.propagation_path(node)
            .into_iter()
            .find(|id| self.tag(*id) == Some(tag))
    }

    /// Is the node attached to the body.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.body, node)
    }

    /// Find the first connected element with the given `id` attribute, in tree order.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut pending: SmallVec<[NodeId; 16]> = SmallVec::new();
        pending.push(self.body);
        while let Some(current) = pending.pop() {
            if self.attribute(current, "id") == Some(id) {
                return Some(current);
            }
            pending.extend(self.children(current).iter().rev().copied());
        }
        None
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(node, &mut result);
        result
    }

    /// Push text content of the subtree to `result`
    fn collect_text(&self, node: NodeId, result: &mut String) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        if let NodeKind::Text(text) = &data.kind {
            result.push_str(text);
        }
        for child in &data.children {
            self.collect_text(*child, result);
        }
    }

    /// Serialize the node and its subtree to html.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut result = String::new();
        self.write_html(node, &mut result);
        result
    }

    /// Serialize the children of the node to html.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut result = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut result);
        }
        result
    }

    /// Write the html for the subtree to `out`
    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };

        match &data.kind {
            NodeKind::Text(text) => escape_into(text, false, out),
            NodeKind::Comment => out.push_str("<!---->"),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    out.push_str(" class=\"");
                    for (index, class) in element.classes.iter().enumerate() {
                        if index != 0 {
                            out.push(' ');
                        }
                        escape_into(class, true, out);
                    }
                    out.push('"');
                }
                for (key, value) in &element.attributes {
                    let _ = write!(out, " {key}=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag) {
                    return;
                }
                for child in &data.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Escape html special characters
fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for character in text.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with_text(doc: &mut Document, tag: &'static str, text: &'static str) -> NodeId {
        let element = doc.create_element(tag);
        let text = doc.create_text(Cow::Borrowed(text));
        doc.append_child(element, text);
        element
    }

    #[test]
    fn serializes_nested_elements() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.add_class(div, Cow::Borrowed("card"));
        doc.add_class(div, Cow::Borrowed("wide"));
        doc.set_attribute(div, "id", Cow::Borrowed("main"));
        let span = element_with_text(&mut doc, "span", "a < b & \"c\"");
        doc.append_child(div, span);
        let img = doc.create_element("img");
        doc.set_attribute(img, "alt", Cow::Borrowed("say \"hi\""));
        doc.append_child(div, img);

        assert_eq!(
            doc.outer_html(div),
            "<div class=\"card wide\" id=\"main\"><span>a &lt; b &amp; \"c\"</span><img alt=\"say &quot;hi&quot;\"></div>"
        );
    }

    #[test]
    fn replace_keeps_position_and_removes_old_subtree() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = element_with_text(&mut doc, "p", "first");
        let second = element_with_text(&mut doc, "p", "second");
        doc.append_child(body, first);
        doc.append_child(body, second);

        let old_text = doc.children(first).first().copied().unwrap_or_default();

        let replacement = element_with_text(&mut doc, "h1", "new");
        doc.replace(first, replacement);

        assert_eq!(doc.children(body), &[replacement, second]);
        assert!(!doc.contains(first));
        assert!(!doc.contains(old_text));
        assert_eq!(doc.text_content(body), "newsecond");
    }

    #[test]
    fn get_element_by_id_searches_in_tree_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        let sibling = doc.create_element("p");
        doc.set_attribute(inner, "id", Cow::Borrowed("target"));
        doc.set_attribute(sibling, "id", Cow::Borrowed("target"));
        doc.append_child(outer, inner);
        doc.append_child(body, outer);
        doc.append_child(body, sibling);

        assert_eq!(doc.get_element_by_id("target"), Some(inner));
        assert_eq!(doc.get_element_by_id("missing"), None);

        let detached = doc.create_element("div");
        doc.set_attribute(detached, "id", Cow::Borrowed("floating"));
        assert_eq!(doc.get_element_by_id("floating"), None);
        assert!(!doc.is_connected(detached));
    }

    #[test]
    fn propagation_path_and_closest() {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc.create_element("form");
        let row = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(body, form);
        doc.append_child(form, row);
        doc.append_child(row, button);

        assert_eq!(
            doc.propagation_path(button).as_slice(),
            &[button, row, form, body]
        );
        assert_eq!(doc.closest(button, "form"), Some(form));
        assert_eq!(doc.closest(button, "button"), Some(button));
        assert_eq!(doc.closest(row, "table"), None);
    }

    #[test]
    fn attributes_can_be_removed() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "disabled", Cow::Borrowed(""));
        doc.set_attribute(input, "placeholder", Cow::Borrowed("name"));
        doc.remove_attribute(input, "disabled");

        assert_eq!(doc.attribute(input, "disabled"), None);
        assert_eq!(doc.outer_html(input), "<input placeholder=\"name\">");
    }

    #[test]
    #[should_panic(expected = "own subtree")]
    fn cycles_are_rejected() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(parent, child);
        doc.append_child(child, parent);
    }
}
