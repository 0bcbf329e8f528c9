//! Arena-backed XML document tree.
//!
//! Nodes live in a single `Vec` and are addressed by [`NodeId`]. Every node
//! records its parent, so handlers can look at surrounding structure (the
//! enclosing list of an item, the section depth of a heading) without a
//! separate ancestor stack.

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    /// Namespace URI, None when no namespace is in scope.
    pub namespace: Option<String>,
    /// Local part of the name.
    pub local: String,
    /// Prefix as written in the source, kept for diagnostics.
    pub prefix: Option<String>,
}

impl QName {
    /// Create a name in the given namespace.
    #[must_use]
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            local: local.into(),
            prefix: None,
        }
    }

    /// Whether this name is `local` in namespace `ns`.
    #[must_use]
    pub fn is(&self, ns: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(ns) && self.local == local
    }
}

/// Element payload: name and ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    #[must_use]
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered, rooted XML tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    /// Create a document with the given root element.
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element(root),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.push_node(parent, NodeKind::Element(element))
    }

    /// Append text to `parent`, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let last = self.nodes[parent.0].children.last().copied();
        if let Some(last) = last
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].kind
        {
            existing.push_str(text);
            return;
        }
        self.push_node(parent, NodeKind::Text(text.to_owned()));
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Element payload, None for text nodes.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children of `id`, skipping text.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// Whether `id` is the element `local` in namespace `ns`.
    #[must_use]
    pub fn is_element(&self, id: NodeId, ns: &str, local: &str) -> bool {
        self.element(id).is_some_and(|e| e.name.is(ns, local))
    }

    /// First child element named `local` in namespace `ns`.
    #[must_use]
    pub fn first_child_element(&self, id: NodeId, ns: &str, local: &str) -> Option<NodeId> {
        self.element_children(id)
            .find(|&child| self.is_element(child, ns, local))
    }

    /// Text content of the first child element named `local` in `ns`.
    #[must_use]
    pub fn child_text(&self, id: NodeId, ns: &str, local: &str) -> Option<String> {
        self.first_child_element(id, ns, local)
            .map(|child| self.text_content(child))
    }

    /// Concatenated text of `id` and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeKind::Text(text) = self.kind(node) {
                out.push_str(text);
            }
        }
        out
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// No-op on text nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element(element) = &mut self.nodes[id.0].kind {
            let value = value.into();
            if let Some(slot) = element.attrs.iter_mut().find(|(key, _)| key == name) {
                slot.1 = value;
            } else {
                element.attrs.push((name.to_owned(), value));
            }
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let NodeKind::Element(element) = &mut self.nodes[id.0].kind else {
            return None;
        };
        let index = element.attrs.iter().position(|(key, _)| key == name)?;
        Some(element.attrs.remove(index).1)
    }

    /// Pre-order traversal of `id` and its descendants.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Fluent builder for documents, for tests and for callers that assemble
/// CNXML without going through XML text.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    element: Element,
    content: Vec<Content>,
}

#[derive(Debug, Clone)]
enum Content {
    Element(ElementBuilder),
    Text(String),
}

impl ElementBuilder {
    #[must_use]
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            element: Element::new(QName::new(namespace, local)),
            content: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.content.push(Content::Text(text.to_owned()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.content.push(Content::Element(child));
        self
    }

    /// Build a document rooted at this element.
    #[must_use]
    pub fn build(self) -> Document {
        let mut doc = Document::new(self.element);
        let root = doc.root();
        append_content(&mut doc, root, self.content);
        doc
    }
}

fn append_content(doc: &mut Document, parent: NodeId, content: Vec<Content>) {
    for item in content {
        match item {
            Content::Text(text) => doc.append_text(parent, &text),
            Content::Element(builder) => {
                let id = doc.append_element(parent, builder.element);
                append_content(doc, id, builder.content);
            }
        }
    }
}
