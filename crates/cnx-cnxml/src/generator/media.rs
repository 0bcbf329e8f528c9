//! Media selection and rendering.
//!
//! A `media` element offers alternative renditions of the same content. One
//! child is chosen by its `for` attribute and rendered; the rest are dropped.

use crate::attributes::{self as attr, MediaChildFor};
use crate::dom::NodeId;
use crate::html::HtmlId;
use crate::tags::CnxmlTag;

use super::engine::Generator;

const CDF_MIME_TYPES: [&str; 2] = [
    "application/vnd.wolfram.cdf",
    "application/vnd.wolfram.cdf.text",
];
const FLASH_MIME_TYPE: &str = "application/x-shockwave-flash";
const JAVA_APPLET_MIME_TYPE: &str = "application/x-java-applet";

pub(super) fn media(g: &mut Generator<'_>, id: NodeId) {
    let Some((child, tag)) = select_child(g, id) else {
        return;
    };

    match tag {
        CnxmlTag::Image => image(g, id, child),
        CnxmlTag::Object | CnxmlTag::Flash => {
            let mime = g.attr(child, attr::MIME_TYPE);
            if mime.is_some_and(|mime| CDF_MIME_TYPES.contains(&mime)) {
                cdf(g, id, child);
            } else {
                let fallback = (tag == CnxmlTag::Flash).then_some(FLASH_MIME_TYPE);
                object(g, id, child, mime.or(fallback));
            }
        }
        CnxmlTag::JavaApplet => object(g, id, child, Some(JAVA_APPLET_MIME_TYPE)),
        CnxmlTag::Audio | CnxmlTag::Video => playable(g, id, child, tag.as_str()),
        CnxmlTag::Labview | CnxmlTag::Download => download(g, id, child),
        _ => g.unrecognized(child, tag.as_str()),
    }
}

/// Pick the rendition to show.
///
/// `webview2.0` wins outright, `pdf` is never shown, anything else is
/// eligible and the first eligible child wins.
fn select_child(g: &Generator<'_>, id: NodeId) -> Option<(NodeId, CnxmlTag)> {
    let mut selected = None;
    for child in g.doc.element_children(id) {
        let Some(tag) = g
            .doc
            .element(child)
            .filter(|element| element.name.namespace.as_deref() == Some(g.ns))
            .and_then(|element| CnxmlTag::parse(&element.name.local))
            .filter(|tag| tag.is_media_child())
        else {
            continue;
        };

        match MediaChildFor::of(g.attr(child, attr::FOR), MediaChildFor::Default) {
            MediaChildFor::Override => return Some((child, tag)),
            MediaChildFor::Pdf => {}
            MediaChildFor::Default | MediaChildFor::Online => {
                selected = selected.or(Some((child, tag)));
            }
        }
    }
    selected
}

fn alt<'a>(g: &Generator<'a>, media: NodeId) -> &'a str {
    g.attr(media, attr::ALT).unwrap_or("")
}

fn copy_attr(g: &mut Generator<'_>, source: NodeId, html: HtmlId, from: &str, to: &str) {
    if let Some(value) = g.attr(source, from) {
        g.tree.set_attr(html, to, value);
    }
}

fn copy_size(g: &mut Generator<'_>, source: NodeId, html: HtmlId) {
    copy_attr(g, source, html, attr::WIDTH, "width");
    copy_attr(g, source, html, attr::HEIGHT, "height");
}

fn image(g: &mut Generator<'_>, media: NodeId, child: NodeId) {
    let src = g.attr(child, attr::SRC);
    let thumbnail = g.attr(child, attr::THUMBNAIL);

    // A thumbnail links to the full-size image.
    let parent = match (thumbnail, src) {
        (Some(_), Some(src)) => {
            let anchor = g.add("a");
            g.tree.set_attr(anchor, "href", src);
            anchor
        }
        _ => g.output(),
    };

    let alt = alt(g, media);
    let img = g.tree.append_element(parent, "img");
    g.copy_id(media, img);
    g.tree.set_attr(img, "alt", alt);
    if let Some(src) = thumbnail.or(src) {
        g.tree.set_attr(img, "src", src);
    }
    copy_size(g, child, img);
}

fn object(g: &mut Generator<'_>, media: NodeId, child: NodeId, mime: Option<&str>) {
    let html = g.add("object");
    g.copy_id(media, html);
    copy_attr(g, child, html, attr::SRC, "data");
    if let Some(mime) = mime {
        g.tree.set_attr(html, "type", mime);
    }
    copy_size(g, child, html);
    let alt = alt(g, media);
    g.tree.append_text(html, alt);
}

/// Wolfram CDF: `<object>` with an `<embed>` fallback, followed by a download link.
fn cdf(g: &mut Generator<'_>, media: NodeId, child: NodeId) {
    let src = g.attr(child, attr::SRC).unwrap_or("");
    let mime = g.attr(child, attr::MIME_TYPE).unwrap_or("");

    let html = g.add("object");
    g.copy_id(media, html);
    g.tree.set_attr(html, "data", src);
    g.tree.set_attr(html, "type", mime);
    copy_size(g, child, html);

    let param = g.tree.append_element(html, "param");
    g.tree.set_attr(param, "name", "src");
    g.tree.set_attr(param, "value", src);

    let embed = g.tree.append_element(html, "embed");
    g.tree.set_attr(embed, "src", src);
    g.tree.set_attr(embed, "type", mime);
    copy_size(g, child, embed);

    let download = g.add("div");
    g.tree.set_attr(download, "class", "downloadLink");
    let anchor = g.tree.append_element(download, "a");
    g.tree.set_attr(anchor, "href", src);
    g.tree.append_text(anchor, "Download CDF");
}

fn playable(g: &mut Generator<'_>, media: NodeId, child: NodeId, name: &str) {
    let html = g.add(name);
    g.copy_id(media, html);
    copy_attr(g, child, html, attr::SRC, "src");
    g.tree.set_attr(html, "controls", "controls");
    let alt = alt(g, media);
    g.tree.append_text(html, alt);
}

fn download(g: &mut Generator<'_>, media: NodeId, child: NodeId) {
    let html = g.add("a");
    g.copy_id(media, html);
    copy_attr(g, child, html, attr::SRC, "href");
    copy_attr(g, child, html, attr::MIME_TYPE, "type");
    let label = format!("Download {}", alt(g, media));
    g.tree.append_text(html, label);
}
