//! Module to HTML fragment.

use std::time::Instant;

use crate::error::RenderError;
use crate::generator::Generator;
use crate::id_index::IdIndex;
use crate::module::Module;
use crate::numbering::Numbering;
use crate::processor::ProcessorChain;
use crate::serializer::HtmlSerializer;

/// Runs the processor chain and the generator over a module.
///
/// A fresh [`Generator`] is created for every call, so one renderer can serve
/// any number of sequential renders.
///
/// # Example
///
/// ```
/// use cnx_cnxml::{CnxmlParser, Module, Renderer};
///
/// let xml = r#"<document xmlns="http://cnx.rice.edu/cnxml">
///   <title>Hello</title>
///   <content><para id="p1">Hello, World!</para></content>
/// </document>"#;
/// let doc = CnxmlParser::new().parse(xml).unwrap();
/// let html = Renderer::default().render(Module::new("m1", doc)).unwrap();
/// assert_eq!(html, r#"<p id="p1">Hello, World!</p>"#);
/// ```
#[derive(Default)]
pub struct Renderer {
    processors: ProcessorChain,
}

impl Renderer {
    #[must_use]
    pub fn new(processors: ProcessorChain) -> Self {
        Self { processors }
    }

    #[must_use]
    pub fn processors(&self) -> &ProcessorChain {
        &self.processors
    }

    /// Render the module's `content` element to an HTML fragment.
    ///
    /// A module without a `content` element renders to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Process`] if a processor fails. No partial
    /// output is produced.
    pub fn render(&self, module: Module) -> Result<String, RenderError> {
        let start = Instant::now();
        let module = self.processors.apply(module)?;

        let Some(content) = module.content_root() else {
            tracing::debug!(module = module.id(), "No content element");
            return Ok(String::new());
        };

        let doc = module.document();
        let namespace = module.cnxml_namespace();
        let numbering = Numbering::build(doc, namespace);
        let ids = IdIndex::build(doc, content);

        let tree = Generator::new(doc, namespace, &numbering, &ids).generate(content)?;
        let html = HtmlSerializer::new().serialize_children(&tree, tree.root());

        tracing::debug!(
            module = module.id(),
            elapsed_ms = start.elapsed().as_millis(),
            "Rendered"
        );
        Ok(html)
    }
}
