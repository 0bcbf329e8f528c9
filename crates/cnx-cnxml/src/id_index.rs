//! Lookup from `id` attribute values to elements.

use std::collections::HashMap;

use crate::attributes as attr;
use crate::dom::{Document, NodeId};

/// Map from `id` to the element that carries it.
///
/// When an id repeats, the first element in document order wins.
#[derive(Debug, Default)]
pub struct IdIndex {
    ids: HashMap<String, NodeId>,
}

impl IdIndex {
    /// Index every element under `root` (inclusive) with a non-empty `id`.
    #[must_use]
    pub fn build(doc: &Document, root: NodeId) -> Self {
        let mut ids = HashMap::new();
        for id in doc.descendants(root) {
            if let Some(value) = doc.attr(id, attr::ID).filter(|v| !v.is_empty()) {
                ids.entry(value.to_owned()).or_insert(id);
            }
        }
        Self { ids }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::ElementBuilder;

    #[test]
    fn test_build_indexes_nested_ids() {
        let doc = ElementBuilder::new(None, "content")
            .child(
                ElementBuilder::new(None, "section")
                    .attr("id", "s1")
                    .child(ElementBuilder::new(None, "para").attr("id", "p1")),
            )
            .child(ElementBuilder::new(None, "para").attr("id", ""))
            .build();
        let index = IdIndex::build(&doc, doc.root());

        assert_eq!(index.len(), 2);
        let para = index.get("p1").unwrap();
        assert_eq!(doc.element(para).unwrap().name.local, "para");
        assert!(index.get("s1").is_some());
        assert_eq!(index.get(""), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let doc = ElementBuilder::new(None, "content")
            .child(ElementBuilder::new(None, "first").attr("id", "dup"))
            .child(ElementBuilder::new(None, "second").attr("id", "dup"))
            .build();
        let index = IdIndex::build(&doc, doc.root());
        let found = index.get("dup").unwrap();
        assert_eq!(doc.element(found).unwrap().name.local, "first");
    }

    #[test]
    fn test_build_limited_to_subtree() {
        let doc = ElementBuilder::new(None, "document")
            .child(ElementBuilder::new(None, "title").attr("id", "outside"))
            .child(
                ElementBuilder::new(None, "content")
                    .child(ElementBuilder::new(None, "para").attr("id", "inside")),
            )
            .build();
        let content = doc.element_children(doc.root()).nth(1).unwrap();
        let index = IdIndex::build(&doc, content);
        assert!(index.get("inside").is_some());
        assert_eq!(index.get("outside"), None);
    }
}
