//! Intermediate HTML tree built by the generator.
//!
//! An arena of element, text and comment nodes addressed by [`HtmlId`].
//! Nodes can be created detached and attached later, and a temporary
//! container can be dissolved with [`HtmlTree::unwrap`], which splices its
//! children into its parent at the container's position.

/// Handle to a node inside an [`HtmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HtmlId(usize);

/// HTML node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Slot {
    node: HtmlNode,
    parent: Option<HtmlId>,
    children: Vec<HtmlId>,
}

/// Arena of HTML nodes under a throwaway root element.
#[derive(Debug, Clone)]
pub struct HtmlTree {
    slots: Vec<Slot>,
}

impl HtmlTree {
    /// Create a tree whose root is a placeholder; only its children are output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: HtmlNode::Element {
                    name: String::new(),
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> HtmlId {
        HtmlId(0)
    }

    fn create(&mut self, node: HtmlNode) -> HtmlId {
        let id = HtmlId(self.slots.len());
        self.slots.push(Slot {
            node,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: impl Into<String>) -> HtmlId {
        self.create(HtmlNode::Element {
            name: name.into(),
            attrs: Vec::new(),
        })
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn append(&mut self, parent: HtmlId, child: HtmlId) {
        debug_assert!(self.slots[child.0].parent.is_none(), "node already attached");
        self.slots[child.0].parent = Some(parent);
        self.slots[parent.0].children.push(child);
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: HtmlId, name: impl Into<String>) -> HtmlId {
        let id = self.create_element(name);
        self.append(parent, id);
        id
    }

    /// Append a text node; empty text is skipped.
    pub fn append_text(&mut self, parent: HtmlId, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let id = self.create(HtmlNode::Text(text));
        self.append(parent, id);
    }

    pub fn append_comment(&mut self, parent: HtmlId, text: impl Into<String>) {
        let id = self.create(HtmlNode::Comment(text.into()));
        self.append(parent, id);
    }

    /// Set an attribute, replacing an existing value in place.
    ///
    /// No-op on text and comment nodes.
    pub fn set_attr(&mut self, id: HtmlId, name: &str, value: impl Into<String>) {
        if let HtmlNode::Element { attrs, .. } = &mut self.slots[id.0].node {
            let value = value.into();
            if let Some(slot) = attrs.iter_mut().find(|(key, _)| key == name) {
                slot.1 = value;
            } else {
                attrs.push((name.to_owned(), value));
            }
        }
    }

    /// Replace `id` in its parent with its own children.
    ///
    /// The node itself is left detached and empty. No-op on a detached node.
    pub fn unwrap(&mut self, id: HtmlId) {
        let Some(parent) = self.slots[id.0].parent else {
            return;
        };
        let children = std::mem::take(&mut self.slots[id.0].children);
        for &child in &children {
            self.slots[child.0].parent = Some(parent);
        }
        let siblings = &mut self.slots[parent.0].children;
        if let Some(index) = siblings.iter().position(|&s| s == id) {
            siblings.splice(index..=index, children);
        }
        self.slots[id.0].parent = None;
    }

    #[must_use]
    pub fn node(&self, id: HtmlId) -> &HtmlNode {
        &self.slots[id.0].node
    }

    #[must_use]
    pub fn children(&self, id: HtmlId) -> &[HtmlId] {
        &self.slots[id.0].children
    }

    #[must_use]
    pub fn parent(&self, id: HtmlId) -> Option<HtmlId> {
        self.slots[id.0].parent
    }
}

impl Default for HtmlTree {
    fn default() -> Self {
        Self::new()
    }
}
