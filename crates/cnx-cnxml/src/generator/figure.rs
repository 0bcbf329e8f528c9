//! Equations, figures and subfigures.

use crate::attributes::{self as attr, FigureOrientation};
use crate::dom::NodeId;
use crate::html::HtmlId;
use crate::tags::CnxmlTag;

use super::engine::{Generator, TITLE_CLASS};

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

pub(super) fn equation(g: &mut Generator<'_>, id: NodeId, number: u32) {
    g.title_div(id);

    let html = g.add("div");
    g.tree.set_attr(html, "class", "equation");
    g.copy_id(id, html);
    let content = g.tree.append_element(html, "div");
    g.tree.set_attr(content, "class", "content");
    let number_div = g.tree.append_element(html, "div");
    g.tree.set_attr(number_div, "class", "number");
    let text = match g.child_text(id, CnxmlTag::Label) {
        Some(label) => format!("{label} {number}"),
        None => format!("({number})"),
    };
    g.tree.append_text(number_div, text);

    g.push(id, content);
}

pub(super) fn figure(g: &mut Generator<'_>, id: NodeId, number: u32) {
    g.title_div(id);

    let html = g.add("figure");
    g.copy_id(id, html);

    let label = g
        .child_text(id, CnxmlTag::Label)
        .unwrap_or_else(|| "Figure".to_owned());

    if g.child(id, CnxmlTag::Subfigure).is_some() {
        let orient = FigureOrientation::of(
            g.attr(id, attr::ORIENT),
            FigureOrientation::Horizontal,
        );
        let body = g.tree.append_element(html, "div");
        g.tree.set_attr(body, "class", orient.as_str());
        figure_caption(g, id, html, &format!("{label} {number}"), true);
        g.push(id, body);
    } else {
        let body = g.tree.append_element(html, "span");
        figure_caption(g, id, html, &format!("{label} {number}"), true);
        g.push_unwrapped(id, body);
    }
}

pub(super) fn subfigure(g: &mut Generator<'_>, id: NodeId) {
    let index = g.doc.parent(id).map_or(0, |parent| {
        g.doc
            .children(parent)
            .iter()
            .take_while(|&&sibling| sibling != id)
            .filter(|&&sibling| g.is(sibling, CnxmlTag::Subfigure))
            .count()
    });

    g.title_div(id);
    let html = g.add("figure");
    g.tree.set_attr(html, "class", "subfigure");
    g.copy_id(id, html);
    let body = g.tree.append_element(html, "span");
    figure_caption(g, id, html, &subfigure_prefix(index), false);
    g.push_unwrapped(id, body);
}

/// Append `<figcaption>` to `html`: the title prefix, then the `caption` child.
fn figure_caption(
    g: &mut Generator<'_>,
    id: NodeId,
    html: HtmlId,
    prefix: &str,
    colon: bool,
) {
    let figcaption = g.tree.append_element(html, "figcaption");
    let title = g.tree.append_element(figcaption, "span");
    g.tree.set_attr(title, "class", TITLE_CLASS);

    match g.child(id, CnxmlTag::Caption) {
        Some(caption) => {
            let text = if colon {
                format!("{prefix}:")
            } else {
                prefix.to_owned()
            };
            g.tree.append_text(title, text);
            g.tree.append_text(figcaption, " ");
            g.push(caption, figcaption);
        }
        None => g.tree.append_text(title, prefix),
    }
}

/// Caption prefix for the subfigure at `index`: `(a)`, ..., `(z)`, `(aa)`, ...
///
/// Bijective base-26, so every index has exactly one prefix.
pub(crate) fn subfigure_prefix(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(ALPHABET[n % 26]));
        n /= 26;
    }
    let letters: String = letters.into_iter().rev().collect();
    format!("({letters})")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::engine::test_support::render;
    use super::*;

    #[test]
    fn test_subfigure_prefix() {
        let cases = [
            (0, "(a)"),
            (3, "(d)"),
            (25, "(z)"),
            (26, "(aa)"),
            (51, "(az)"),
            (78, "(ca)"),
            (701, "(zz)"),
            (702, "(aaa)"),
            (730, "(abc)"),
            (18277, "(zzz)"),
            (18278, "(aaaa)"),
            (108_969, "(feed)"),
            (475_253, "(zzzz)"),
        ];
        for (index, expected) in cases {
            assert_eq!(subfigure_prefix(index), expected, "index {index}");
        }
    }

    #[test]
    fn test_subfigure_prefix_strictly_increasing() {
        let prefixes: Vec<String> = (0..2000).map(subfigure_prefix).collect();
        for pair in prefixes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.len() < b.len() || (a.len() == b.len() && a < b), "{a} < {b}");
        }
    }

    #[test]
    fn test_equation() {
        assert_eq!(
            render(r#"<equation id="e"><title>Euler</title>x</equation>"#),
            concat!(
                r#"<div class="title">Euler</div>"#,
                r#"<div class="equation" id="e"><div class="content">x</div><div class="number">(1)</div></div>"#
            )
        );
    }

    #[test]
    fn test_equation_label() {
        assert_eq!(
            render("<equation><label>Eq.</label>x</equation>"),
            r#"<div class="equation"><div class="content">x</div><div class="number">Eq. 1</div></div>"#
        );
    }

    #[test]
    fn test_figure_with_media() {
        assert_eq!(
            render(r#"<figure id="f"><media alt="A graph"><image src="g.png"/></media></figure>"#),
            r#"<figure id="f"><img alt="A graph" src="g.png"><figcaption><span class="title">Figure 1</span></figcaption></figure>"#
        );
    }

    #[test]
    fn test_figure_title_and_caption() {
        assert_eq!(
            render(
                r#"<figure id="f"><title>Growth</title><caption>Rate of <emphasis>growth</emphasis></caption>x</figure>"#
            ),
            concat!(
                r#"<div class="title">Growth</div><figure id="f">x<figcaption>"#,
                r#"<span class="title">Figure 1:</span> Rate of <strong>growth</strong>"#,
                "</figcaption></figure>"
            )
        );
    }

    #[test]
    fn test_figure_label() {
        assert_eq!(
            render("<figure><label>Chart</label></figure><figure/>"),
            concat!(
                r#"<figure><figcaption><span class="title">Chart 1</span></figcaption></figure>"#,
                r#"<figure><figcaption><span class="title">Figure 2</span></figcaption></figure>"#
            )
        );
    }

    #[test]
    fn test_subfigures() {
        assert_eq!(
            render(
                r#"<figure id="f" orient="vertical"><subfigure id="a">A</subfigure><subfigure><caption>Second</caption>B</subfigure></figure>"#
            ),
            concat!(
                r#"<figure id="f"><div class="vertical">"#,
                r#"<figure class="subfigure" id="a">A<figcaption><span class="title">(a)</span></figcaption></figure>"#,
                r#"<figure class="subfigure">B<figcaption><span class="title">(b)</span> Second</figcaption></figure>"#,
                r#"</div><figcaption><span class="title">Figure 1</span></figcaption></figure>"#
            )
        );
    }

    #[test]
    fn test_subfigures_default_horizontal() {
        assert_eq!(
            render("<figure><subfigure>A</subfigure></figure>"),
            concat!(
                r#"<figure><div class="horizontal">"#,
                r#"<figure class="subfigure">A<figcaption><span class="title">(a)</span></figcaption></figure>"#,
                r#"</div><figcaption><span class="title">Figure 1</span></figcaption></figure>"#
            )
        );
    }
}
