//! Sequence numbers for figures, tables, equations and other numbered elements.

use std::collections::HashMap;

use crate::attributes as attr;
use crate::dom::{Document, NodeId};
use crate::tags::CnxmlTag;

/// Element to sequence number, built once per render.
///
/// Counters are keyed by (tag, `type` attribute), so `<rule type="law">`
/// elements are numbered independently of untyped rules.
#[derive(Debug, Default)]
pub struct Numbering {
    numbers: HashMap<NodeId, u32>,
}

impl Numbering {
    /// Number every element of [`CnxmlTag::NUMBERED`] in document order.
    ///
    /// Walks the whole document, not just the content root.
    #[must_use]
    pub fn build(doc: &Document, cnxml_namespace: &str) -> Self {
        let mut counters: HashMap<(CnxmlTag, &str), u32> = HashMap::new();
        let mut numbers = HashMap::new();

        for id in doc.descendants(doc.root()) {
            let Some(element) = doc.element(id) else {
                continue;
            };
            if element.name.namespace.as_deref() != Some(cnxml_namespace) {
                continue;
            }
            let Some(tag) = CnxmlTag::parse(&element.name.local).filter(|t| t.is_numbered())
            else {
                continue;
            };
            let kind = element.attr(attr::TYPE).unwrap_or("");
            let counter = counters.entry((tag, kind)).or_insert(0);
            *counter += 1;
            numbers.insert(id, *counter);
        }

        Self { numbers }
    }

    /// Number assigned to `id`, None if it is not a numbered element.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<u32> {
        self.numbers.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
