//! Inline handlers: emphasis, links, scripts and line breaks.

use crate::attributes::{self as attr, EmphasisEffect, NewlineEffect};
use crate::dom::NodeId;
use crate::tags::CnxmlTag;

use super::engine::Generator;

const DEFAULT_LINK_TEXT: &str = "link";

/// Upper bound on repetitions for a single `newline`.
const MAX_NEWLINES: usize = 100;

pub(super) fn emphasis(g: &mut Generator<'_>, id: NodeId) {
    let (name, class) = match EmphasisEffect::of(g.attr(id, attr::EFFECT), EmphasisEffect::Bold) {
        EmphasisEffect::Bold => ("strong", None),
        EmphasisEffect::Italics => ("em", None),
        EmphasisEffect::Underline => ("u", None),
        EmphasisEffect::Smallcaps => ("span", Some("smallcaps")),
        EmphasisEffect::Normal => ("span", Some("normal")),
    };
    let html = g.add(name);
    if let Some(class) = class {
        g.tree.set_attr(html, "class", class);
    }
    g.copy_id(id, html);
    g.push(id, html);
}

/// `link`, `foreign` and `term`.
///
/// By now link processing has reduced every reference to a single `url`;
/// a bare `target-id` is still honoured for unprocessed documents.
pub(super) fn link(g: &mut Generator<'_>, id: NodeId) {
    let class = if g.is(id, CnxmlTag::Foreign) {
        Some("foreign")
    } else if g.is(id, CnxmlTag::Term) {
        Some("term")
    } else {
        None
    };
    let url = g.attr(id, attr::URL);
    let target_id = g.attr(id, attr::TARGET_ID);

    let href = match (url, target_id) {
        (Some(url), _) => Some(url.to_owned()),
        (None, Some(target)) if g.attr(id, attr::DOCUMENT).is_none() => Some(format!("#{target}")),
        _ => None,
    };

    // Only an emitted anchor or span carries default text.
    let default_text = g
        .doc
        .children(id)
        .is_empty()
        .then(|| default_link_text(g, url, target_id));

    let Some(href) = href else {
        if let Some(class) = class {
            let html = g.add("span");
            g.tree.set_attr(html, "class", class);
            g.copy_id(id, html);
            if let Some(text) = default_text {
                g.tree.append_text(html, text);
            }
            g.push(id, html);
        } else {
            // Nothing to point at: keep the content, drop the link.
            let output = g.output();
            g.push(id, output);
        }
        return;
    };

    let html = g.add("a");
    if let Some(class) = class {
        g.tree.set_attr(html, "class", class);
    }
    g.copy_id(id, html);
    g.tree.set_attr(html, "href", href);
    if g.attr(id, attr::WINDOW) == Some("new") {
        g.tree.set_attr(html, "target", "_blank");
    }
    if let Some(text) = default_text {
        g.tree.append_text(html, text);
    }
    g.push(id, html);
}

/// Text for an empty link: the target's caption label when it points at a
/// numbered figure or equation in this document.
fn default_link_text(g: &Generator<'_>, url: Option<&str>, target_id: Option<&str>) -> String {
    let target = url
        .and_then(|url| url.strip_prefix('#'))
        .or(target_id);

    if let Some(target) = target
        && let Some(node) = g.ids.get(target)
        && let Some(number) = g.numbering.get(node)
    {
        if g.is(node, CnxmlTag::Figure) {
            return format!("Figure {number}");
        }
        if g.is(node, CnxmlTag::Equation) {
            return format!("Equation {number}");
        }
    }
    DEFAULT_LINK_TEXT.to_owned()
}

pub(super) fn sup(g: &mut Generator<'_>, id: NodeId) {
    g.push_element(id, "sup");
}

pub(super) fn sub(g: &mut Generator<'_>, id: NodeId) {
    g.push_element(id, "sub");
}

pub(super) fn preformat(g: &mut Generator<'_>, id: NodeId) {
    g.push_element(id, "pre");
}

pub(super) fn newline(g: &mut Generator<'_>, id: NodeId) {
    let count = match g.attr(id, attr::COUNT) {
        None => 1,
        // Negative counts repeat nothing.
        Some(value) => match value.trim().parse::<i64>() {
            Ok(count) => usize::try_from(count.max(0)).unwrap_or(usize::MAX),
            Err(_) => {
                tracing::error!(count = value, "Newline count is not a number");
                return;
            }
        },
    };
    if count > MAX_NEWLINES {
        tracing::warn!(count, max = MAX_NEWLINES, "Newline count clamped");
    }
    let count = count.min(MAX_NEWLINES);
    let name = match NewlineEffect::of(g.attr(id, attr::EFFECT), NewlineEffect::Normal) {
        NewlineEffect::Normal => "br",
        NewlineEffect::Underline => "hr",
    };

    let parent = if g.attr(id, attr::ID).is_some() {
        let anchor = g.add("a");
        g.copy_id(id, anchor);
        anchor
    } else {
        g.output()
    };
    for _ in 0..count {
        g.tree.append_element(parent, name);
    }
}
