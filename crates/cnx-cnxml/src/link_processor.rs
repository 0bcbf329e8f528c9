//! Link resolution: bakes final URIs into link and media elements.
//!
//! [`LinkProcessor`] walks every CNXML element of a module. Link-bearing
//! elements (`link`, `foreign`, `term`) have their semantic reference replaced
//! by a single `url` attribute, and media children have their `src` rewritten.
//! Both go through an injected [`LinkResolver`].

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::attributes as attr;
use crate::dom::{Document, NodeId};
use crate::error::{ProcessError, ResolveError};
use crate::links::{escape_file_name, escape_link_attribute, is_uri_reference};
use crate::module::{Module, Resources};
use crate::processor::Processor;
use crate::tags::CnxmlTag;

/// Turns semantic references into concrete URIs.
///
/// Implementations may do I/O. Any error aborts the render.
pub trait LinkResolver: Send + Sync {
    /// Resolve a literal URI reference (absolute, relative or `#fragment`).
    fn resolve_uri(&self, uri: &str) -> Result<String, ResolveError>;

    /// Resolve a reference to another document.
    ///
    /// At least one of `document` and `version` is present.
    fn resolve_document(
        &self,
        document: Option<&str>,
        version: Option<&str>,
    ) -> Result<String, ResolveError>;

    /// Resolve a named resource, scoped to an optional document and version.
    fn resolve_resource(
        &self,
        document: Option<&str>,
        version: Option<&str>,
        resource: &str,
    ) -> Result<String, ResolveError>;
}

/// Processor that resolves every link and media reference in a module.
pub struct LinkProcessor {
    resolver: Arc<dyn LinkResolver>,
}

impl LinkProcessor {
    /// Name used in the `processors` configuration list.
    pub const NAME: &'static str = "links";

    #[must_use]
    pub fn new(resolver: Arc<dyn LinkResolver>) -> Self {
        Self { resolver }
    }

    fn resolve_link(&self, doc: &mut Document, id: NodeId) -> Result<(), ResolveError> {
        let get = |name: &str| doc.attr(id, name).map(str::to_owned);
        let url = get(attr::URL);
        let resource = get(attr::RESOURCE);
        let document = get(attr::DOCUMENT);
        let version = get(attr::VERSION);
        let target_id = get(attr::TARGET_ID);

        let target = if let Some(url) = url {
            self.resolver.resolve_uri(&escape_link_attribute(&url))?
        } else if let Some(resource) = resource {
            self.resolver
                .resolve_resource(document.as_deref(), version.as_deref(), &resource)?
        } else if document.is_some() || version.is_some() {
            let target = self
                .resolver
                .resolve_document(document.as_deref(), version.as_deref())?;
            match target_id {
                Some(fragment) => with_fragment(&target, &fragment),
                None => target,
            }
        } else if let Some(fragment) = target_id {
            self.resolver
                .resolve_uri(&format!("#{}", escape_link_attribute(&fragment)))?
        } else {
            return Ok(());
        };

        doc.set_attr(id, attr::URL, target);
        for name in [attr::TARGET_ID, attr::RESOURCE, attr::DOCUMENT, attr::VERSION] {
            doc.remove_attr(id, name);
        }
        Ok(())
    }

    fn resolve_media(&self, doc: &mut Document, id: NodeId) -> Result<(), ResolveError> {
        let Some(src) = doc.attr(id, attr::SRC).map(str::to_owned) else {
            return Ok(());
        };
        let src = if is_uri_reference(&src) {
            src
        } else {
            tracing::error!(src = %src, "Forcing string escape for media source");
            escape_link_attribute(&src)
        };
        let target = self.resolver.resolve_uri(&src)?;
        doc.set_attr(id, attr::SRC, target);
        Ok(())
    }
}

impl Processor for LinkProcessor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&self, mut module: Module) -> Result<Module, ProcessError> {
        let namespace = module.cnxml_namespace().to_owned();
        let doc = module.document_mut();

        let targets: Vec<(NodeId, CnxmlTag)> = doc
            .descendants(doc.root())
            .filter_map(|id| {
                let element = doc.element(id)?;
                if element.name.namespace.as_deref() != Some(namespace.as_str()) {
                    return None;
                }
                CnxmlTag::parse(&element.name.local).map(|tag| (id, tag))
            })
            .collect();

        for (id, tag) in targets {
            match tag {
                CnxmlTag::Link | CnxmlTag::Foreign | CnxmlTag::Term => {
                    self.resolve_link(doc, id)?;
                }
                tag if tag.is_media_child() => self.resolve_media(doc, id)?,
                _ => {}
            }
        }
        Ok(module)
    }
}

/// Replace any fragment of `uri` with `fragment`.
fn with_fragment(uri: &str, fragment: &str) -> String {
    let base = uri.split_once('#').map_or(uri, |(base, _)| base);
    format!("{base}#{}", escape_link_attribute(fragment))
}

/// URL templates used by [`TemplateResolver`].
///
/// Templates use `{document}`, `{version}` and `{resource}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    /// Specific version of a document.
    pub document: String,
    /// Latest version of a document.
    pub latest: String,
    /// Resource belonging to another document.
    pub resource: String,
    /// Prefix for template output and root-relative URIs.
    pub base_url: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            document: "/content/{document}/{version}/".to_owned(),
            latest: "/content/{document}/latest/".to_owned(),
            resource: "/content/{document}/{version}/{resource}".to_owned(),
            base_url: String::new(),
        }
    }
}

/// Version used for resources of another document when none is given.
const LATEST_VERSION: &str = "latest";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(document|version|resource)\}").expect("invalid placeholder regex")
});

/// [`LinkResolver`] that fills URL templates and looks up the module's own
/// resources in its resource map.
pub struct TemplateResolver {
    templates: LinkTemplates,
    module_id: String,
    resources: Resources,
}

impl TemplateResolver {
    #[must_use]
    pub fn new(templates: LinkTemplates, module_id: impl Into<String>, resources: Resources) -> Self {
        Self {
            templates,
            module_id: module_id.into(),
            resources,
        }
    }

    fn fill(&self, template: &str, document: &str, version: &str, resource: &str) -> String {
        let path = PLACEHOLDER.replace_all(template, |caps: &regex::Captures| match &caps[1] {
            "document" => escape_file_name(document),
            "version" => escape_file_name(version),
            _ => escape_file_name(resource),
        });
        format!("{}{path}", self.templates.base_url)
    }

    fn is_current(&self, document: Option<&str>) -> bool {
        document.is_none_or(|d| d == self.module_id)
    }
}

impl LinkResolver for TemplateResolver {
    fn resolve_uri(&self, uri: &str) -> Result<String, ResolveError> {
        if uri.starts_with('/') && !uri.starts_with("//") {
            return Ok(format!("{}{uri}", self.templates.base_url));
        }
        // Absolute, fragment-only and module-relative references pass through.
        Ok(uri.to_owned())
    }

    fn resolve_document(
        &self,
        document: Option<&str>,
        version: Option<&str>,
    ) -> Result<String, ResolveError> {
        match (document, version) {
            (Some(document), Some(version)) => {
                Ok(self.fill(&self.templates.document, document, version, ""))
            }
            (Some(document), None) => Ok(self.fill(&self.templates.latest, document, "", "")),
            (None, Some(version)) => {
                Ok(self.fill(&self.templates.document, &self.module_id, version, ""))
            }
            (None, None) => Err(ResolveError::InvalidReference(
                "document reference needs a document or a version".to_owned(),
            )),
        }
    }

    fn resolve_resource(
        &self,
        document: Option<&str>,
        version: Option<&str>,
        resource: &str,
    ) -> Result<String, ResolveError> {
        if self.is_current(document) && version.is_none() {
            return self
                .resources
                .get(resource)
                .map(str::to_owned)
                .ok_or_else(|| ResolveError::UnknownResource(resource.to_owned()));
        }
        Ok(self.fill(
            &self.templates.resource,
            document.unwrap_or(&self.module_id),
            version.unwrap_or(LATEST_VERSION),
            resource,
        ))
    }
}
