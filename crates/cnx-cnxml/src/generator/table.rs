//! CALS tables.

use crate::attributes::{self as attr, CalsAlign, CalsFrame, CalsVerticalAlign};
use crate::dom::NodeId;
use crate::tags::CnxmlTag;

use super::engine::{Generator, TITLE_CLASS, class_list};

/// Table parts in output order.
const PARTS: [CnxmlTag; 3] = [CnxmlTag::Thead, CnxmlTag::Tbody, CnxmlTag::Tfoot];

pub(super) fn table(g: &mut Generator<'_>, id: NodeId, number: u32) {
    // Only the first tgroup is rendered.
    let tgroup = g.child(id, CnxmlTag::Tgroup);

    let html = g.add("table");
    g.copy_id(id, html);
    let mut classes = vec![
        "cals",
        frame_class(CalsFrame::of(g.attr(id, attr::FRAME), CalsFrame::All)),
    ];
    if let Some(tgroup) = tgroup {
        classes.extend(cals_classes(g, tgroup));
    }
    g.tree.set_attr(html, "class", classes.join(" "));

    if let Some(tgroup) = tgroup {
        for tag in PARTS {
            let Some(part) = g.child(tgroup, tag) else {
                continue;
            };
            let part_html = g.tree.append_element(html, tag.as_str());
            if let Some(class) = class_list(&cals_classes(g, part)) {
                g.tree.set_attr(part_html, "class", class);
            }
            g.push(part, part_html);
        }
    }

    let label = g
        .child_text(id, CnxmlTag::Label)
        .unwrap_or_else(|| "Table".to_owned());
    let caption = g.tree.append_element(html, "caption");
    let title = g.tree.append_element(caption, "span");
    g.tree.set_attr(title, "class", TITLE_CLASS);

    if g.child(id, CnxmlTag::Title).is_some() {
        g.tree.append_text(title, format!("{label} {number}:"));
        g.tree.append_text(caption, " ");
        g.push_title_into(id, caption);
    } else if let Some(summary) = g.attr(id, attr::SUMMARY) {
        g.tree.append_text(title, format!("{label} {number}:"));
        g.tree.append_text(caption, format!(" {summary}"));
    } else {
        g.tree.append_text(title, format!("{label} {number}"));
    }
}

pub(super) fn row(g: &mut Generator<'_>, id: NodeId) {
    let html = g.add("tr");
    if let Some(class) = class_list(&cals_classes(g, id)) {
        g.tree.set_attr(html, "class", class);
    }
    g.push(id, html);
}

pub(super) fn entry(g: &mut Generator<'_>, id: NodeId) {
    let in_head = g
        .doc
        .parent(id)
        .and_then(|row| g.doc.parent(row))
        .is_some_and(|part| g.is(part, CnxmlTag::Thead));

    let html = g.add(if in_head { "th" } else { "td" });
    if let Some(class) = class_list(&cals_classes(g, id)) {
        g.tree.set_attr(html, "class", class);
    }
    if let Some(rows) = g
        .attr(id, attr::MOREROWS)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&rows| rows > 0)
    {
        g.tree.set_attr(html, "rowspan", (rows + 1).to_string());
    }
    if let Some(columns) = colspan(g, id) {
        g.tree.set_attr(html, "colspan", columns.to_string());
    }
    g.push(id, html);
}

/// Columns covered by `namest`..`nameend`, counted through the tgroup's colspecs.
fn colspan(g: &Generator<'_>, entry: NodeId) -> Option<usize> {
    let start = g.attr(entry, attr::NAMEST)?;
    let end = g.attr(entry, attr::NAMEEND)?;

    let mut current = g.doc.parent(entry);
    let tgroup = loop {
        let node = current?;
        if g.is(node, CnxmlTag::Tgroup) {
            break node;
        }
        current = g.doc.parent(node);
    };

    let names: Vec<&str> = g
        .doc
        .element_children(tgroup)
        .filter(|&child| g.is(child, CnxmlTag::Colspec))
        .filter_map(|colspec| g.attr(colspec, attr::COLNAME))
        .collect();
    let first = names.iter().position(|&name| name == start)?;
    let last = names.iter().position(|&name| name == end)?;
    (last > first).then(|| last - first + 1)
}

fn frame_class(frame: CalsFrame) -> &'static str {
    match frame {
        CalsFrame::All => "calsFrameAll",
        CalsFrame::Sides => "calsFrameSides",
        CalsFrame::Top => "calsFrameTop",
        CalsFrame::Bottom => "calsFrameBottom",
        CalsFrame::TopBottom => "calsFrameTopBottom",
    }
}

/// Classes for the `align`, `valign`, `colsep` and `rowsep` of a CALS element.
fn cals_classes(g: &Generator<'_>, id: NodeId) -> Vec<&'static str> {
    let mut classes = Vec::with_capacity(4);

    if let Some(align) = g.attr(id, attr::ALIGN).and_then(CalsAlign::parse) {
        classes.push(match align {
            CalsAlign::Left => "calsAlignLeft",
            CalsAlign::Right => "calsAlignRight",
            CalsAlign::Center => "calsAlignCenter",
            CalsAlign::Justify => "calsAlignJustify",
        });
    }
    if let Some(valign) = g.attr(id, attr::VALIGN).and_then(CalsVerticalAlign::parse) {
        classes.push(match valign {
            CalsVerticalAlign::Top => "calsValignTop",
            CalsVerticalAlign::Middle => "calsValignMiddle",
            CalsVerticalAlign::Bottom => "calsValignBottom",
        });
    }
    if let Some(colsep) = g.attr(id, attr::COLSEP) {
        classes.push(if colsep == attr::CALS_NO_SEP {
            "calsNoColsep"
        } else {
            "calsColsep"
        });
    }
    if let Some(rowsep) = g.attr(id, attr::ROWSEP) {
        classes.push(if rowsep == attr::CALS_NO_SEP {
            "calsNoRowsep"
        } else {
            "calsRowsep"
        });
    }

    classes
}
