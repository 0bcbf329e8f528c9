//! Frame stack, tag dispatch and shared handler helpers.

use std::collections::HashMap;

use crate::attributes as attr;
use crate::dom::{Document, NodeId, NodeKind};
use crate::error::GenerateError;
use crate::html::{HtmlId, HtmlTree};
use crate::id_index::IdIndex;
use crate::numbering::Numbering;
use crate::serializer::escape_html;
use crate::tags::{CnxmlTag, MATHML_NAMESPACE};

use super::{block, figure, inline, list, media, table};

/// Class carried by every generated title element.
pub(super) const TITLE_CLASS: &str = "title";

/// Inline style used for `display="none"`.
pub(super) const DISPLAY_NONE_STYLE: &str = "display:none;";

/// One entry of the walk: remaining source children and where their output goes.
#[derive(Debug)]
struct Frame {
    children: Vec<NodeId>,
    next: usize,
    output: HtmlId,
    /// Splice `output`'s children into its parent when the frame is exhausted.
    unwrap: bool,
}

type PlainHandler = fn(&mut Generator<'_>, NodeId);
type NumberedHandler = fn(&mut Generator<'_>, NodeId, u32);

#[derive(Clone, Copy)]
enum Handler {
    Plain(PlainHandler),
    /// Receives the element's sequence number from the numbering map.
    Numbered(NumberedHandler),
    /// Consumed by the enclosing element's handler.
    Ignore,
    Unrecognized,
}

fn handler(tag: CnxmlTag) -> Handler {
    use CnxmlTag as T;

    match tag {
        T::Para => Handler::Plain(block::paragraph),
        T::Section => Handler::Plain(block::section),
        T::Code => Handler::Plain(block::code),
        T::Note => Handler::Plain(block::note),
        T::Meaning => Handler::Plain(block::meaning),
        T::Commentary => Handler::Plain(block::commentary),
        T::Problem => Handler::Plain(block::problem),
        T::Statement => Handler::Plain(block::statement),
        T::Solution => Handler::Plain(block::solution),
        T::Proof => Handler::Plain(block::proof),
        T::Definition => Handler::Numbered(block::definition),
        T::Exercise => Handler::Numbered(block::exercise),
        T::Example => Handler::Numbered(block::example),
        T::Rule => Handler::Numbered(block::rule),

        T::Emphasis => Handler::Plain(inline::emphasis),
        T::Link | T::Foreign | T::Term => Handler::Plain(inline::link),
        T::Sup => Handler::Plain(inline::sup),
        T::Sub => Handler::Plain(inline::sub),
        T::Preformat => Handler::Plain(inline::preformat),
        T::Newline => Handler::Plain(inline::newline),

        T::List => Handler::Plain(list::list),
        T::Item => Handler::Plain(list::item),

        T::Equation => Handler::Numbered(figure::equation),
        T::Figure => Handler::Numbered(figure::figure),
        T::Subfigure => Handler::Plain(figure::subfigure),

        T::Table => Handler::Numbered(table::table),
        T::Row => Handler::Plain(table::row),
        T::Entry => Handler::Plain(table::entry),

        T::Media => Handler::Plain(media::media),

        T::Title | T::Label | T::Caption => Handler::Ignore,

        T::Document
        | T::Metadata
        | T::Content
        | T::Tgroup
        | T::Colspec
        | T::Thead
        | T::Tbody
        | T::Tfoot
        | T::Image
        | T::Object
        | T::Flash
        | T::Labview
        | T::Download
        | T::Audio
        | T::Video
        | T::JavaApplet => Handler::Unrecognized,
    }
}

/// Stack-based walker that turns a CNXML content tree into an [`HtmlTree`].
///
/// Holds per-render state; create one per render.
pub struct Generator<'a> {
    pub(super) doc: &'a Document,
    pub(super) ns: &'a str,
    pub(super) numbering: &'a Numbering,
    pub(super) ids: &'a IdIndex,
    pub(super) tree: HtmlTree,
    stack: Vec<Frame>,
    /// Output parent of the element being dispatched.
    current: HtmlId,
    /// Last `item` of each list with an item separator.
    pub(super) last_items: HashMap<NodeId, NodeId>,
}

impl<'a> Generator<'a> {
    /// Create a generator over `doc`, treating `ns` as the CNXML namespace.
    #[must_use]
    pub fn new(
        doc: &'a Document,
        ns: &'a str,
        numbering: &'a Numbering,
        ids: &'a IdIndex,
    ) -> Self {
        let tree = HtmlTree::new();
        let current = tree.root();
        Self {
            doc,
            ns,
            numbering,
            ids,
            tree,
            stack: Vec::new(),
            current,
            last_items: HashMap::new(),
        }
    }

    /// Walk the children of `content` and return the finished tree.
    ///
    /// The result is the children of [`HtmlTree::root`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Unnumbered`] if a numbered element is missing
    /// from the numbering map.
    pub fn generate(mut self, content: NodeId) -> Result<HtmlTree, GenerateError> {
        let root = self.tree.root();
        self.push(content, root);

        while let Some(frame) = self.stack.last_mut() {
            if frame.next >= frame.children.len() {
                let (output, unwrap) = (frame.output, frame.unwrap);
                self.stack.pop();
                if unwrap {
                    self.tree.unwrap(output);
                }
                continue;
            }

            let child = frame.children[frame.next];
            frame.next += 1;
            let output = frame.output;
            self.current = output;

            match self.doc.kind(child) {
                NodeKind::Text(text) => self.tree.append_text(output, text.clone()),
                NodeKind::Element(_) => self.element(child)?,
            }
        }

        Ok(self.tree)
    }

    fn element(&mut self, id: NodeId) -> Result<(), GenerateError> {
        let Some(element) = self.doc.element(id) else {
            return Ok(());
        };
        let local = element.name.local.as_str();

        match element.name.namespace.as_deref() {
            Some(ns) if ns == self.ns => {}
            Some(MATHML_NAMESPACE) => {
                self.math(id);
                return Ok(());
            }
            _ => {
                self.unrecognized(id, local);
                return Ok(());
            }
        }

        let Some(tag) = CnxmlTag::parse(local) else {
            self.unrecognized(id, local);
            return Ok(());
        };

        match handler(tag) {
            Handler::Plain(handle) => handle(self, id),
            Handler::Numbered(handle) => {
                let number = self
                    .numbering
                    .get(id)
                    .ok_or(GenerateError::Unnumbered { tag: tag.as_str() })?;
                handle(self, id, number);
            }
            Handler::Ignore => {}
            Handler::Unrecognized => self.unrecognized(id, local),
        }
        Ok(())
    }

    /// Copy a `MathML` element, translating the legacy `mode` attribute.
    fn math(&mut self, id: NodeId) {
        let Some(element) = self.doc.element(id) else {
            return;
        };
        let html = self.add(element.name.local.clone());
        let has_display = element.attr(attr::DISPLAY).is_some();

        for (key, value) in &element.attrs {
            if !has_display && key == attr::MATHML_MODE {
                continue;
            }
            self.tree.set_attr(html, key, value.clone());
        }
        if !has_display && let Some(mode) = element.attr(attr::MATHML_MODE) {
            let display = if mode == "display" { "block" } else { "inline" };
            self.tree.set_attr(html, attr::DISPLAY, display);
        }

        self.push(id, html);
    }

    /// Emit a placeholder for an element that cannot be rendered.
    ///
    /// The element's children are dropped.
    pub(super) fn unrecognized(&mut self, id: NodeId, message: &str) {
        let Some(element) = self.doc.element(id) else {
            return;
        };

        let mut simple = format!("<{}", element.name.local);
        for (key, value) in &element.attrs {
            simple.push_str(&format!(" {key}=\"{}\"", escape_html(value)));
        }
        simple.push_str(&format!(">...</{}>", element.name.local));

        tracing::warn!(element = %simple, "Unrecognized element");

        let output = self.output();
        self.tree.append_comment(output, simple);
        let div = self.add("div");
        self.tree.set_attr(div, "class", "unhandled");
        self.tree
            .append_text(div, format!("Unrecognized Content: {message}"));
    }

    /// Output parent of the element being dispatched.
    ///
    /// Frames pushed by a handler do not change it, so a handler can add
    /// several siblings.
    pub(super) fn output(&self) -> HtmlId {
        self.current
    }

    /// Append a new element to the current output parent.
    pub(super) fn add(&mut self, name: impl Into<String>) -> HtmlId {
        let output = self.output();
        self.tree.append_element(output, name)
    }

    /// Visit all children of `source`, writing into `output`.
    pub(super) fn push(&mut self, source: NodeId, output: HtmlId) {
        let children = self.doc.children(source).to_vec();
        self.push_nodes(children, output, false);
    }

    /// Like [`push`](Self::push), but dissolve `output` once it is filled.
    pub(super) fn push_unwrapped(&mut self, source: NodeId, output: HtmlId) {
        let children = self.doc.children(source).to_vec();
        self.push_nodes(children, output, true);
    }

    pub(super) fn push_nodes(&mut self, children: Vec<NodeId>, output: HtmlId, unwrap: bool) {
        self.stack.push(Frame {
            children,
            next: 0,
            output,
            unwrap,
        });
    }

    /// Add `name` to the current output and visit `source`'s children into it.
    pub(super) fn push_element(&mut self, source: NodeId, name: &str) -> HtmlId {
        let html = self.add(name);
        self.copy_id(source, html);
        self.push(source, html);
        html
    }

    /// Add a `<div class=...>` with the source id and visit its children.
    pub(super) fn push_div(&mut self, source: NodeId, class: &str) -> HtmlId {
        let html = self.add("div");
        self.tree.set_attr(html, "class", class);
        self.copy_id(source, html);
        self.push(source, html);
        html
    }

    pub(super) fn copy_id(&mut self, source: NodeId, html: HtmlId) {
        if let Some(id) = self.doc.attr(source, attr::ID) {
            self.tree.set_attr(html, "id", id);
        }
    }

    pub(super) fn attr(&self, source: NodeId, name: &str) -> Option<&'a str> {
        self.doc.attr(source, name)
    }

    pub(super) fn child(&self, source: NodeId, tag: CnxmlTag) -> Option<NodeId> {
        self.doc.first_child_element(source, self.ns, tag.as_str())
    }

    pub(super) fn child_text(&self, source: NodeId, tag: CnxmlTag) -> Option<String> {
        self.doc.child_text(source, self.ns, tag.as_str())
    }

    pub(super) fn is(&self, id: NodeId, tag: CnxmlTag) -> bool {
        self.doc.is_element(id, self.ns, tag.as_str())
    }

    /// Render `source`'s `title` child, if any, into `html`.
    ///
    /// Returns whether a title was found.
    pub(super) fn push_title_into(&mut self, source: NodeId, html: HtmlId) -> bool {
        let Some(title) = self.child(source, CnxmlTag::Title) else {
            return false;
        };
        self.push(title, html);
        true
    }

    /// Add a `<div class="title">` holding `source`'s title, if it has one.
    pub(super) fn title_div(&mut self, source: NodeId) -> Option<HtmlId> {
        let title = self.child(source, CnxmlTag::Title)?;
        let div = self.add("div");
        self.tree.set_attr(div, "class", TITLE_CLASS);
        self.push(title, div);
        Some(div)
    }

    /// Add a title element to `parent` reading `"{label}"` or `"{label}: {title}"`.
    pub(super) fn labeled_title(
        &mut self,
        source: NodeId,
        parent: HtmlId,
        name: &str,
        label: &str,
    ) -> HtmlId {
        let html = self.tree.append_element(parent, name);
        self.tree.set_attr(html, "class", TITLE_CLASS);
        if self.child(source, CnxmlTag::Title).is_some() {
            self.tree.append_text(html, format!("{label}: "));
            self.push_title_into(source, html);
        } else {
            self.tree.append_text(html, label);
        }
        html
    }
}

/// Join class names, None when there are none.
pub(super) fn class_list(classes: &[&str]) -> Option<String> {
    (!classes.is_empty()).then(|| classes.join(" "))
}
