//! Lists and list items.

use crate::attributes::{self as attr, BulletStyle, Display, ListType};
use crate::dom::NodeId;
use crate::html::HtmlId;
use crate::tags::CnxmlTag;

use super::engine::{DISPLAY_NONE_STYLE, Generator, TITLE_CLASS};

pub(super) fn list(g: &mut Generator<'_>, id: NodeId) {
    let display = Display::of(g.attr(id, attr::DISPLAY), Display::Block);
    if display == Display::Inline {
        g.unrecognized(id, &format!("list {}={}", attr::DISPLAY, display.as_str()));
        return;
    }

    let html = match ListType::of(g.attr(id, attr::LIST_TYPE), ListType::Bulleted) {
        ListType::Bulleted => bulleted(g, id),
        ListType::Enumerated => enumerated(g, id),
        ListType::LabeledItem => {
            let html = g.add("ul");
            g.tree.set_attr(html, "class", "labeled");
            g.copy_id(id, html);
            html
        }
    };
    if display == Display::None {
        g.tree.set_attr(html, "style", DISPLAY_NONE_STYLE);
    }
    if g.attr(id, attr::ITEM_SEP).is_some()
        && let Some(last) = g
            .doc
            .element_children(id)
            .filter(|&child| g.is(child, CnxmlTag::Item))
            .last()
    {
        g.last_items.insert(id, last);
    }
    g.push(id, html);
}

fn bulleted(g: &mut Generator<'_>, id: NodeId) -> HtmlId {
    let html = g.add("ul");
    g.copy_id(id, html);
    match BulletStyle::of(g.attr(id, attr::BULLET_STYLE), BulletStyle::Bullet) {
        BulletStyle::Bullet => {}
        BulletStyle::None => g.tree.set_attr(html, "class", "bulletStyleNone"),
        style => tracing::warn!(style = style.as_str(), "Unsupported bullet style"),
    }
    html
}

fn enumerated(g: &mut Generator<'_>, id: NodeId) -> HtmlId {
    let html = g.add("ol");
    g.copy_id(id, html);
    if let Some(style) = g.attr(id, attr::NUMBER_STYLE) {
        g.tree.set_attr(html, "type", number_type(style));
    }
    if let Some(start) = g.attr(id, attr::START_VALUE) {
        g.tree.set_attr(html, "start", start);
    }
    html
}

/// HTML `<ol type>` for a CNXML `number-style`. Unknown styles pass through.
fn number_type(style: &str) -> &str {
    match style {
        "arabic" => "1",
        "upper-alpha" => "A",
        "lower-alpha" => "a",
        "upper-roman" => "I",
        "lower-roman" => "i",
        other => other,
    }
}

pub(super) fn item(g: &mut Generator<'_>, id: NodeId) {
    let list = g.doc.parent(id).filter(|&parent| g.is(parent, CnxmlTag::List));

    let html = g.add("li");
    g.copy_id(id, html);

    if let Some(list) = list
        && ListType::of(g.attr(list, attr::LIST_TYPE), ListType::Bulleted) == ListType::LabeledItem
        && let Some(label) = g.child(id, CnxmlTag::Label)
    {
        let title = g.tree.append_element(html, "span");
        g.tree.set_attr(title, "class", TITLE_CLASS);
        g.push(label, title);
    }

    let separator = list
        .filter(|list| g.last_items.get(list).is_some_and(|&last| last != id))
        .and_then(|list| g.attr(list, attr::ITEM_SEP));
    if let Some(separator) = separator {
        // Item content goes into a placeholder that is dissolved once filled,
        // keeping it ahead of the separator.
        let body = g.tree.append_element(html, "span");
        g.tree.append_text(html, separator);
        g.push_unwrapped(id, body);
    } else {
        g.push(id, html);
    }
}
