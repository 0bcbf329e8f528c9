//! HTML fragment serializer.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use crate::html::{HtmlId, HtmlNode, HtmlTree};

/// Elements that have no end tag and never carry content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Serialize an [`HtmlTree`] to escaped HTML text.
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize the children of `parent`, without `parent` itself.
    #[must_use]
    pub fn serialize_children(&self, tree: &HtmlTree, parent: HtmlId) -> String {
        let mut out = String::with_capacity(4096);
        for &child in tree.children(parent) {
            self.serialize_into(tree, child, &mut out);
        }
        out
    }

    /// Serialize `id` and its subtree.
    #[must_use]
    pub fn serialize(&self, tree: &HtmlTree, id: HtmlId) -> String {
        let mut out = String::new();
        self.serialize_into(tree, id, &mut out);
        out
    }

    /// Append the serialization of `id` to `out`.
    ///
    /// Uses an explicit stack so deeply nested math cannot overflow.
    pub fn serialize_into(&self, tree: &HtmlTree, id: HtmlId, out: &mut String) {
        enum Step<'a> {
            Open(HtmlId),
            Close(&'a str),
        }

        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Close(name) => {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                    continue;
                }
                Step::Open(node) => node,
            };

            match tree.node(node) {
                HtmlNode::Text(text) => out.push_str(&escape_html(text)),
                HtmlNode::Comment(text) => {
                    // Hyphens are dropped so the text can never close the comment.
                    out.push_str("<!--\n");
                    out.push_str(&escape_html(&text.replace('-', "")));
                    out.push_str("\n-->");
                }
                HtmlNode::Element { name, attrs } => {
                    out.push('<');
                    out.push_str(name);
                    for (key, value) in attrs {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                    out.push('>');
                    if is_void(name) {
                        continue;
                    }
                    stack.push(Step::Close(name));
                    stack.extend(tree.children(node).iter().rev().map(|&c| Step::Open(c)));
                }
            }
        }
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Escape `&`, `<`, `>` and `"` for text and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"x\"</b>"),
            "&lt;b&gt;&quot;x&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry's");
        assert_eq!(escape_html("caf\u{e9}"), "caf\u{e9}");
    }

    #[test]
    fn test_serialize_nested_with_attributes() {
        let mut tree = HtmlTree::new();
        let root = tree.root();
        let p = tree.append_element(root, "p");
        tree.set_attr(p, "id", "a&b");
        tree.set_attr(p, "class", "x\"y");
        tree.append_text(p, "Hello, ");
        let em = tree.append_element(p, "em");
        tree.append_text(em, "World");

        assert_eq!(
            HtmlSerializer::new().serialize_children(&tree, root),
            r#"<p id="a&amp;b" class="x&quot;y">Hello, <em>World</em></p>"#
        );
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let mut tree = HtmlTree::new();
        let root = tree.root();
        let img = tree.append_element(root, "img");
        tree.set_attr(img, "src", "example.png");
        tree.append_text(img, "dropped");
        tree.append_element(root, "br");
        tree.append_element(root, "hr");

        assert_eq!(
            HtmlSerializer::new().serialize_children(&tree, root),
            r#"<img src="example.png"><br><hr>"#
        );
    }

    #[test]
    fn test_empty_non_void_element_is_closed() {
        let mut tree = HtmlTree::new();
        let root = tree.root();
        tree.append_element(root, "div");
        assert_eq!(
            HtmlSerializer::new().serialize_children(&tree, root),
            "<div></div>"
        );
    }

    #[test]
    fn test_comment_strips_hyphens_and_escapes() {
        let mut tree = HtmlTree::new();
        let root = tree.root();
        tree.append_comment(root, "<x>--></x>");
        assert_eq!(
            HtmlSerializer::new().serialize_children(&tree, root),
            "<!--\n&lt;x&gt;&gt;&lt;/x&gt;\n-->"
        );
    }

    #[test]
    fn test_serialize_single_node() {
        let mut tree = HtmlTree::new();
        let root = tree.root();
        let div = tree.append_element(root, "div");
        tree.append_text(div, "...");
        assert_eq!(
            HtmlSerializer::new().serialize(&tree, div),
            "<div>...</div>"
        );
    }
}
