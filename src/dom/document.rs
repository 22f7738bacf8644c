//! Arena-backed element tree standing in for the rendered page.
//!
//! The engine never touches a global document: it is handed an explicit
//! [`Document`], so tests substitute a fixture tree for the real page root.

use std::collections::HashMap;

/// Handle to one node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Builder for a node about to be attached to a document.
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name.
    tag: String,
    /// `id` attribute, if any.
    id: Option<String>,
    /// Class list.
    classes: Vec<String>,
    /// Other attributes.
    attrs: Vec<(String, String)>,
    /// Text content.
    text: Option<String>,
}

impl Element {
    /// Starts a builder for `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    /// Sets the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Property keys for the original-value cache.
const ORIGINAL_TEXT: &str = "text";
const ORIGINAL_MARKUP: &str = "markup";

/// One node's stored state.
#[derive(Debug, Clone)]
struct NodeData {
    /// Tag name.
    tag: String,
    /// `id` attribute, if any.
    id: Option<String>,
    /// Class list.
    classes: Vec<String>,
    /// Attribute map.
    attrs: HashMap<String, String>,
    /// Text content.
    text: Option<String>,
    /// Serialized child markup for rich-content containers.
    markup: Option<String>,
    /// Child nodes in document order.
    children: Vec<NodeId>,
    /// First-write cache of pre-mutation values, keyed by property.
    originals: HashMap<String, String>,
}

impl NodeData {
    fn from_element(element: Element) -> Self {
        Self {
            tag: element.tag,
            id: element.id,
            classes: element.classes,
            attrs: element.attrs.into_iter().collect(),
            text: element.text,
            markup: None,
            children: Vec::new(),
            originals: HashMap::new(),
        }
    }
}

/// In-memory element tree.
///
/// Queries return `None` or empty collections for anything missing; no
/// operation panics on a stale [`NodeId`].
#[derive(Debug, Clone)]
pub struct Document {
    /// Node arena; index 0 is the root.
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an empty `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![NodeData::from_element(Element::new("body"))] }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attaches `element` under `parent` and returns its handle.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::from_element(element));
        if let Some(parent_data) = self.nodes.get_mut(parent.0) {
            parent_data.children.push(id);
        } else {
            tracing::debug!("append to unknown parent node; element left detached");
        }
        id
    }

    /// Finds the first node carrying `id`.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(NodeId)
    }

    /// All nodes carrying `class`, in document order.
    #[must_use]
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.classes.iter().any(|c| c == class))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Direct children of `node` in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map_or(&[], |data| data.children.as_slice())
    }

    /// All nodes below `node` in preorder, excluding `node` itself.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Tag name of `node`.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|data| data.tag.as_str())
    }

    /// Text content of `node`.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|data| data.text.as_deref())
    }

    /// Sets the text content of `node`.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.text = Some(text.into());
        }
    }

    /// Attribute `name` of `node`.
    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(node.0).and_then(|data| data.attrs.get(name)).map(String::as_str)
    }

    /// Sets attribute `name` on `node`.
    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attrs.insert(name.into(), value.into());
        }
    }

    /// Serialized child markup of `node`.
    #[must_use]
    pub fn markup(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|data| data.markup.as_deref())
    }

    /// Replaces the serialized child markup of `node`.
    pub fn set_markup(&mut self, node: NodeId, markup: impl Into<String>) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.markup = Some(markup.into());
        }
    }

    /// Stashes the current text of `node` the first time it is called.
    ///
    /// Later calls never overwrite the stashed value, so any number of
    /// toggles restores the exact pre-mutation text.
    pub fn cache_original_text(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node.0)
            && !data.originals.contains_key(ORIGINAL_TEXT)
            && let Some(text) = data.text.clone()
        {
            data.originals.insert(ORIGINAL_TEXT.to_string(), text);
        }
    }

    /// Stashed pre-mutation text of `node`, if any.
    #[must_use]
    pub fn original_text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|data| data.originals.get(ORIGINAL_TEXT)).map(String::as_str)
    }

    /// Stashes the current value of attribute `name` the first time it is
    /// called for that attribute.
    pub fn cache_original_attr(&mut self, node: NodeId, name: &str) {
        let key = format!("attr:{name}");
        if let Some(data) = self.nodes.get_mut(node.0)
            && !data.originals.contains_key(&key)
            && let Some(value) = data.attrs.get(name).cloned()
        {
            data.originals.insert(key, value);
        }
    }

    /// Stashed pre-mutation value of attribute `name`, if any.
    #[must_use]
    pub fn original_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        let key = format!("attr:{name}");
        self.nodes.get(node.0).and_then(|data| data.originals.get(&key)).map(String::as_str)
    }

    /// Stashes the current child markup of `node` the first time it is
    /// called.
    pub fn cache_original_markup(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node.0)
            && !data.originals.contains_key(ORIGINAL_MARKUP)
            && let Some(markup) = data.markup.clone()
        {
            data.originals.insert(ORIGINAL_MARKUP.to_string(), markup);
        }
    }

    /// Stashed pre-mutation child markup of `node`, if any.
    #[must_use]
    pub fn original_markup(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|data| data.originals.get(ORIGINAL_MARKUP))
            .map(String::as_str)
    }

    /// Whether any original value is cached for `node`.
    #[must_use]
    pub fn has_original(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|data| !data.originals.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn sample_document() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let nav = doc.append(root, Element::new("nav").id("site-nav"));
        let _home = doc.append(nav, Element::new("a").class("nav-link").text("Home"));
        let _about = doc.append(nav, Element::new("a").class("nav-link").text("About"));
        (doc, nav)
    }

    #[googletest::test]
    fn by_id_finds_attached_nodes() {
        let (doc, nav) = sample_document();

        expect_that!(doc.by_id("site-nav"), some(eq(nav)));
        expect_that!(doc.by_id("missing"), none());
    }

    #[googletest::test]
    fn by_class_preserves_document_order() {
        let (doc, _nav) = sample_document();

        let links = doc.by_class("nav-link");

        let texts: Vec<_> = links.iter().filter_map(|id| doc.text(*id)).collect();
        expect_that!(texts, elements_are![eq(&"Home"), eq(&"About")]);
    }

    #[googletest::test]
    fn descendants_walks_the_subtree_in_preorder() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.append(root, Element::new("div"));
        let first = doc.append(outer, Element::new("span").text("a"));
        let nested = doc.append(first, Element::new("em").text("b"));
        let second = doc.append(outer, Element::new("span").text("c"));

        let order = doc.descendants(outer);

        expect_that!(order, elements_are![eq(&first), eq(&nested), eq(&second)]);
    }

    #[googletest::test]
    fn text_and_attr_mutations_apply() {
        let mut doc = Document::new();
        let root = doc.root();
        let input = doc.append(root, Element::new("input").id("search").attr("placeholder", "Search"));

        doc.set_attr(input, "placeholder", "Buscar");
        doc.set_text(input, "x");

        expect_that!(doc.attr(input, "placeholder"), some(eq("Buscar")));
        expect_that!(doc.text(input), some(eq("x")));
    }

    #[googletest::test]
    fn original_text_cache_is_first_write_wins() {
        let mut doc = Document::new();
        let root = doc.root();
        let label = doc.append(root, Element::new("span").text("Home"));

        doc.cache_original_text(label);
        doc.set_text(label, "Inicio");
        // A second mutation pass must not clobber the stash
        doc.cache_original_text(label);
        doc.set_text(label, "Accueil");

        expect_that!(doc.original_text(label), some(eq("Home")));
    }

    #[googletest::test]
    fn original_attr_cache_is_keyed_per_attribute() {
        let mut doc = Document::new();
        let root = doc.root();
        let link = doc.append(
            root,
            Element::new("a").attr("href", "/posts/hello/").attr("aria-label", "Older post"),
        );

        doc.cache_original_attr(link, "href");
        doc.set_attr(link, "href", "/alt/posts/hello/");

        expect_that!(doc.original_attr(link, "href"), some(eq("/posts/hello/")));
        expect_that!(doc.original_attr(link, "aria-label"), none());
    }

    #[googletest::test]
    fn markup_cache_round_trips() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append(root, Element::new("div").id("article-content"));
        doc.set_markup(body, "<p>original</p>");

        doc.cache_original_markup(body);
        doc.set_markup(body, "<p>translated</p>");

        expect_that!(doc.markup(body), some(eq("<p>translated</p>")));
        expect_that!(doc.original_markup(body), some(eq("<p>original</p>")));
    }

    #[rstest]
    fn stale_node_id_is_tolerated() {
        let mut doc = Document::new();
        let stale = NodeId(42);

        doc.set_text(stale, "x");
        doc.cache_original_text(stale);

        assert_that!(doc.text(stale), none());
        assert_that!(doc.children(stale), is_empty());
        assert_that!(doc.has_original(stale), eq(false));
    }

    #[googletest::test]
    fn nodes_without_text_are_not_cached() {
        let mut doc = Document::new();
        let root = doc.root();
        let bare = doc.append(root, Element::new("div"));

        doc.cache_original_text(bare);

        expect_that!(doc.has_original(bare), eq(false));
    }
}
