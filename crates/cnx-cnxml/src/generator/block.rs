//! Block-level handlers: paragraphs, sections, notes, code and containers.

use crate::attributes::{self as attr, Display, NoteType, RuleType};
use crate::dom::NodeId;
use crate::tags::CnxmlTag;

use super::engine::{DISPLAY_NONE_STYLE, Generator, TITLE_CLASS};

pub(super) fn paragraph(g: &mut Generator<'_>, id: NodeId) {
    g.title_div(id);
    g.push_element(id, "p");
}

pub(super) fn section(g: &mut Generator<'_>, id: NodeId) {
    let html = g.add("section");
    g.copy_id(id, html);
    if g.child(id, CnxmlTag::Title).is_some() {
        let depth = section_depth(g, id);
        let heading = g.tree.append_element(html, format!("h{depth}"));
        g.push_title_into(id, heading);
    }
    g.push(id, html);
}

/// Nesting level of a section, 1 for a top-level section, capped at 6.
fn section_depth(g: &Generator<'_>, id: NodeId) -> usize {
    let mut depth = 1;
    let mut current = g.doc.parent(id);
    while let Some(parent) = current {
        if g.is(parent, CnxmlTag::Section) {
            depth += 1;
        }
        current = g.doc.parent(parent);
    }
    depth.min(6)
}

pub(super) fn code(g: &mut Generator<'_>, id: NodeId) {
    match Display::of(g.attr(id, attr::DISPLAY), Display::Inline) {
        Display::Inline => {
            g.push_element(id, "code");
        }
        Display::None => {
            let html = g.push_element(id, "code");
            g.tree.set_attr(html, "style", DISPLAY_NONE_STYLE);
        }
        Display::Block => {
            g.title_div(id);
            let pre = g.add("pre");
            let html = g.tree.append_element(pre, "code");
            g.copy_id(id, html);
            g.push(id, html);
        }
    }
}

pub(super) fn note(g: &mut Generator<'_>, id: NodeId) {
    if Display::of(g.attr(id, attr::DISPLAY), Display::Block) == Display::Inline {
        let html = g.add("span");
        g.tree.set_attr(html, "class", "note");
        g.copy_id(id, html);
        g.push(id, html);
        return;
    }

    let label = g.child_text(id, CnxmlTag::Label).unwrap_or_else(|| {
        NoteType::of(g.attr(id, attr::TYPE), NoteType::Note)
            .label()
            .to_owned()
    });

    let html = g.add("div");
    g.tree.set_attr(html, "class", "note");
    g.copy_id(id, html);
    let title = g.tree.append_element(html, "div");
    g.tree.set_attr(title, "class", TITLE_CLASS);
    if g.push_title_into(id, title) {
        // Title content is visited later, so the prefix goes in first.
        g.tree.append_text(title, format!("{label}: "));
    } else {
        g.tree.append_text(title, format!("{label}:"));
    }
    g.push(id, html);
}

pub(super) fn definition(g: &mut Generator<'_>, id: NodeId, number: u32) {
    let html = g.add("div");
    g.tree.set_attr(html, "class", "definition");
    g.copy_id(id, html);

    let label = g
        .child_text(id, CnxmlTag::Label)
        .unwrap_or_else(|| "Definition".to_owned());
    let title = g.tree.append_element(html, "div");
    g.tree.set_attr(title, "class", TITLE_CLASS);
    g.tree.append_text(title, format!("{label} {number}"));
    if let Some(term) = g.child(id, CnxmlTag::Term) {
        g.tree.append_text(title, ": ");
        g.push(term, title);
    }

    let meanings = g.tree.append_element(html, "ol");
    let body: Vec<NodeId> = g
        .doc
        .children(id)
        .iter()
        .copied()
        .filter(|&child| !g.is(child, CnxmlTag::Term))
        .collect();
    g.push_nodes(body, meanings, false);
}

pub(super) fn meaning(g: &mut Generator<'_>, id: NodeId) {
    let html = g.add("li");
    g.tree.set_attr(html, "class", "meaning");
    g.copy_id(id, html);
    g.push(id, html);
}

pub(super) fn exercise(g: &mut Generator<'_>, id: NodeId, number: u32) {
    numbered_container(g, id, number, "exercise", "Exercise");
}

pub(super) fn example(g: &mut Generator<'_>, id: NodeId, number: u32) {
    numbered_container(g, id, number, "example", "Example");
}

pub(super) fn rule(g: &mut Generator<'_>, id: NodeId, number: u32) {
    let label = RuleType::of(g.attr(id, attr::TYPE), RuleType::Rule).label();
    numbered_container(g, id, number, "rule", label);
}

/// `<div class>` with a `"Label N[: Title]"` title line, then the children.
fn numbered_container(
    g: &mut Generator<'_>,
    id: NodeId,
    number: u32,
    class: &str,
    default_label: &str,
) {
    let html = g.add("div");
    g.tree.set_attr(html, "class", class);
    g.copy_id(id, html);

    let label = g
        .child_text(id, CnxmlTag::Label)
        .unwrap_or_else(|| default_label.to_owned());
    g.labeled_title(id, html, "div", &format!("{label} {number}"));
    g.push(id, html);
}

pub(super) fn commentary(g: &mut Generator<'_>, id: NodeId) {
    g.push_div(id, "commentary");
}

pub(super) fn problem(g: &mut Generator<'_>, id: NodeId) {
    g.push_div(id, "problem");
}

pub(super) fn statement(g: &mut Generator<'_>, id: NodeId) {
    g.push_div(id, "statement");
}

pub(super) fn solution(g: &mut Generator<'_>, id: NodeId) {
    fixed_title_container(g, id, "solution", "Solution");
}

pub(super) fn proof(g: &mut Generator<'_>, id: NodeId) {
    fixed_title_container(g, id, "proof", "Proof");
}

fn fixed_title_container(g: &mut Generator<'_>, id: NodeId, class: &str, title: &str) {
    let html = g.add("div");
    g.tree.set_attr(html, "class", class);
    g.copy_id(id, html);
    let title_div = g.tree.append_element(html, "div");
    g.tree.set_attr(title_div, "class", TITLE_CLASS);
    g.tree.append_text(title_div, title);
    g.push(id, html);
}
