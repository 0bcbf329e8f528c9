//! CNXML parser with namespace resolution.
//!
//! Builds a [`Document`] from XML text. Prefixes are resolved against an
//! explicit stack of in-scope `xmlns` declarations, so embedded `MathML` and
//! MDML elements keep their own namespaces whether they are written with a
//! prefix or a default namespace.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::dom::{Document, Element, NodeId, QName};
use crate::error::ParseError;

/// Namespace bound to the reserved `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse CNXML text into a [`Document`].
pub struct CnxmlParser;

impl CnxmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse XML text into a document tree.
    ///
    /// Comments, processing instructions and the doctype are dropped. CDATA
    /// sections become ordinary text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML, uses an undeclared
    /// prefix, or has no root element.
    pub fn parse(&self, xml: &str) -> Result<Document, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut scopes = NamespaceScopes::default();
        let mut doc: Option<Document> = None;
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let id = self.open_element(&reader, &e, &mut scopes, &mut doc, &open)?;
                    open.push(id);
                }
                Event::Empty(e) => {
                    self.open_element(&reader, &e, &mut scopes, &mut doc, &open)?;
                    scopes.pop();
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(doc.as_mut(), open.last(), &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    append_text(doc.as_mut(), open.last(), &decode_entity(&entity));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(doc.as_mut(), open.last(), &text);
                }
                Event::End(_) => {
                    open.pop();
                    scopes.pop();
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }

        doc.ok_or(ParseError::MissingRoot)
    }

    fn open_element<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
        scopes: &mut NamespaceScopes,
        doc: &mut Option<Document>,
        open: &[NodeId],
    ) -> Result<NodeId, ParseError> {
        let mut declarations = Vec::new();
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = self.decode_name(reader, attr.key.as_ref());
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );

            if key == "xmlns" {
                declarations.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push((prefix.to_owned(), value));
            } else {
                attrs.push((key, value));
            }
        }
        scopes.push(declarations);

        let raw_name = self.decode_name(reader, e.name().as_ref());
        let name = scopes.resolve(&raw_name)?;
        let element = Element { name, attrs };

        match (doc.as_mut(), open.last()) {
            (Some(doc), Some(&parent)) => Ok(doc.append_element(parent, element)),
            (Some(_), None) => Err(ParseError::MultipleRoots),
            (None, _) => {
                let created = Document::new(element);
                let root = created.root();
                *doc = Some(created);
                Ok(root)
            }
        }
    }

    fn decode_name<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader.decoder().decode(name).map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            std::borrow::Cow::into_owned,
        )
    }
}

impl Default for CnxmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Stack of namespace declarations, one frame per open element.
#[derive(Default)]
struct NamespaceScopes {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScopes {
    fn push(&mut self, declarations: Vec<(String, String)>) {
        self.frames.push(declarations);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    /// Innermost URI bound to `prefix`; the empty prefix is the default namespace.
    fn lookup(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn resolve(&self, raw: &str) -> Result<QName, ParseError> {
        match raw.split_once(':') {
            Some((prefix, local)) => {
                let uri = self
                    .lookup(prefix)
                    .ok_or_else(|| ParseError::UnboundPrefix(prefix.to_owned()))?;
                Ok(QName {
                    namespace: Some(uri.to_owned()),
                    local: local.to_owned(),
                    prefix: Some(prefix.to_owned()),
                })
            }
            None => Ok(QName {
                // xmlns="" undeclares the default namespace
                namespace: self
                    .lookup("")
                    .filter(|uri| !uri.is_empty())
                    .map(str::to_owned),
                local: raw.to_owned(),
                prefix: None,
            }),
        }
    }
}

fn append_text(doc: Option<&mut Document>, parent: Option<&NodeId>, text: &str) {
    // Text outside the root element (whitespace around it) has no parent.
    if let (Some(doc), Some(&parent)) = (doc, parent) {
        doc.append_text(parent, text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
