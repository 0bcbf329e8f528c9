//! CNXML to HTML fragment renderer.
//!
//! This crate turns a CNXML module (semantic educational markup) into an HTML
//! fragment with no `<html>` or `<body>` wrapper.
//!
//! # Architecture
//!
//! A render runs in fixed phases:
//!
//! 1. **Parse** ([`CnxmlParser`]): XML text to a namespace-resolved
//!    [`Document`] arena.
//! 2. **Process** ([`ProcessorChain`]): whole-module transforms in caller
//!    order. [`LinkProcessor`] bakes every semantic reference into a concrete
//!    `url` through an injected [`LinkResolver`].
//! 3. **Index**: [`Numbering`] assigns sequence numbers to figures, tables,
//!    equations and other numbered elements; [`IdIndex`] maps `id` values to
//!    elements.
//! 4. **Generate** ([`Generator`]): a stack-driven walk of the `content`
//!    element into an [`HtmlTree`].
//! 5. **Serialize** ([`HtmlSerializer`]): the tree to escaped HTML text.
//!
//! [`Renderer`] runs phases 2 to 5 over a [`Module`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cnx_cnxml::{
//!     CnxmlParser, LinkProcessor, LinkTemplates, Module, ProcessorChain, Renderer, Resources,
//!     TemplateResolver,
//! };
//!
//! let xml = r#"<document xmlns="http://cnx.rice.edu/cnxml"><content>
//! <para id="p1">See <link document="m2">the next module</link>.</para>
//! </content></document>"#;
//! let module = Module::new("m1", CnxmlParser::new().parse(xml).unwrap());
//!
//! let resolver = TemplateResolver::new(LinkTemplates::default(), "m1", Resources::new());
//! let chain = ProcessorChain::new().with(LinkProcessor::new(Arc::new(resolver)));
//! let html = Renderer::new(chain).render(module).unwrap();
//!
//! assert!(html.contains(r#"<a href="/content/m2/latest/">the next module</a>"#));
//! ```

pub mod attributes;
mod dom;
mod error;
mod generator;
mod html;
mod id_index;
mod link_processor;
mod links;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod module;
mod numbering;
mod parser;
mod processor;
mod render;
mod serializer;
mod tags;

pub use dom::{Descendants, Document, Element, ElementBuilder, NodeId, NodeKind, QName};
pub use error::{GenerateError, ParseError, ProcessError, RenderError, ResolveError};
pub use generator::Generator;
pub use html::{HtmlId, HtmlNode, HtmlTree};
pub use id_index::IdIndex;
pub use link_processor::{LinkProcessor, LinkResolver, LinkTemplates, TemplateResolver};
pub use links::{escape_file_name, escape_link_attribute, is_uri_reference};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockResolver, ResolverCall};
pub use module::{Actor, Metadata, Module, Organization, Person, Resources};
pub use numbering::Numbering;
pub use parser::CnxmlParser;
pub use processor::{Processor, ProcessorChain};
pub use render::Renderer;
pub use serializer::{HtmlSerializer, escape_html};
pub use tags::{CNXML_NAMESPACE, CnxmlTag, MATHML_NAMESPACE, MDML_NAMESPACE};
