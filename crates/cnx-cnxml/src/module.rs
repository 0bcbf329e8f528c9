//! Renderable module: a parsed document plus the context it renders in.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::dom::{Document, NodeId};
use crate::links::escape_file_name;
use crate::tags::{CNXML_NAMESPACE, CnxmlTag, MDML_NAMESPACE};

/// A CNXML document with its id, resources and optional metadata.
///
/// Constructed once per render and handed through the processor chain by
/// value; the generator only reads it.
#[derive(Debug, Clone)]
pub struct Module {
    id: String,
    document: Document,
    resources: Resources,
    metadata: Option<Metadata>,
    cnxml_namespace: String,
}

impl Module {
    /// Create a module in the default CNXML namespace with no resources.
    #[must_use]
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            resources: Resources::default(),
            metadata: None,
            cnxml_namespace: CNXML_NAMESPACE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Treat `namespace` as the CNXML namespace instead of the default URI.
    #[must_use]
    pub fn with_cnxml_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.cnxml_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn cnxml_namespace(&self) -> &str {
        &self.cnxml_namespace
    }

    /// Text of the document's top-level `title`.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.document.child_text(
            self.document.root(),
            &self.cnxml_namespace,
            CnxmlTag::Title.as_str(),
        )
    }

    /// The `content` element under the document root.
    #[must_use]
    pub fn content_root(&self) -> Option<NodeId> {
        self.document.first_child_element(
            self.document.root(),
            &self.cnxml_namespace,
            CnxmlTag::Content.as_str(),
        )
    }
}

/// Resource name to location map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    entries: BTreeMap<String, String>,
}

impl Resources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous location for `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, location: impl Into<String>) -> Self {
        self.entries.insert(name.into(), location.into());
        self
    }

    /// Build a resource map from the files in `dir`.
    ///
    /// Each file name maps to its URI-escaped form, relative to the module.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut entries = BTreeMap::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let location = escape_file_name(&name);
            entries.insert(name, location);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const METADATA_TAG: &str = "metadata";
const TITLE_TAG: &str = "title";
const ABSTRACT_TAG: &str = "abstract";
const ACTORS_TAG: &str = "actors";
const ROLES_TAG: &str = "roles";
const PERSON_TAG: &str = "person";
const ORGANIZATION_TAG: &str = "organization";
const USER_ID_ATTR: &str = "userid";
const FULL_NAME_TAG: &str = "fullname";
const SHORT_NAME_TAG: &str = "shortname";
const FIRST_NAME_TAG: &str = "firstname";
const SURNAME_TAG: &str = "surname";
const EMAIL_TAG: &str = "email";
const HOMEPAGE_TAG: &str = "homepage";
const ROLE_TAG: &str = "role";
const ROLE_TYPE_ATTR: &str = "type";
const AUTHOR_ROLE: &str = "author";

/// Module metadata read from an MDML block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    /// Authors in role order.
    pub authors: Vec<Actor>,
}

/// A person or organization listed under MDML `actors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Actor {
    Person(Person),
    Organization(Organization),
}

impl Actor {
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        match self {
            Self::Person(p) => p.full_name.as_deref(),
            Self::Organization(o) => o.full_name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub full_name: Option<String>,
    pub short_name: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
}

impl Metadata {
    /// Read the `metadata` block under the document root.
    ///
    /// Returns None when the document has no metadata element. Author role
    /// entries that name an unknown actor are skipped.
    #[must_use]
    pub fn from_document(doc: &Document, cnxml_namespace: &str) -> Option<Self> {
        let block = doc.first_child_element(doc.root(), cnxml_namespace, METADATA_TAG)?;
        let text = |parent: NodeId, tag: &str| doc.child_text(parent, MDML_NAMESPACE, tag);

        let mut actors = BTreeMap::new();
        if let Some(list) = doc.first_child_element(block, MDML_NAMESPACE, ACTORS_TAG) {
            for child in doc.element_children(list) {
                let Some(user_id) = doc.attr(child, USER_ID_ATTR) else {
                    continue;
                };
                let actor = if doc.is_element(child, MDML_NAMESPACE, PERSON_TAG) {
                    Actor::Person(Person {
                        full_name: text(child, FULL_NAME_TAG),
                        first_name: text(child, FIRST_NAME_TAG),
                        surname: text(child, SURNAME_TAG),
                        email: text(child, EMAIL_TAG),
                        homepage: text(child, HOMEPAGE_TAG),
                    })
                } else if doc.is_element(child, MDML_NAMESPACE, ORGANIZATION_TAG) {
                    Actor::Organization(Organization {
                        full_name: text(child, FULL_NAME_TAG),
                        short_name: text(child, SHORT_NAME_TAG),
                        email: text(child, EMAIL_TAG),
                        homepage: text(child, HOMEPAGE_TAG),
                    })
                } else {
                    continue;
                };
                actors.insert(user_id.to_owned(), actor);
            }
        }

        let mut authors = Vec::new();
        if let Some(roles) = doc.first_child_element(block, MDML_NAMESPACE, ROLES_TAG) {
            let author_roles = doc.element_children(roles).filter(|&role| {
                doc.is_element(role, MDML_NAMESPACE, ROLE_TAG)
                    && doc.attr(role, ROLE_TYPE_ATTR) == Some(AUTHOR_ROLE)
            });
            for role in author_roles {
                for user_id in doc.text_content(role).split_whitespace() {
                    match actors.get(user_id) {
                        Some(actor) => authors.push(actor.clone()),
                        None => tracing::warn!(user_id, "Author role names unknown actor"),
                    }
                }
            }
        }

        Some(Self {
            title: text(block, TITLE_TAG),
            summary: text(block, ABSTRACT_TAG),
            authors,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::CnxmlParser;

    const SAMPLE: &str = r#"<document xmlns="http://cnx.rice.edu/cnxml" xmlns:md="http://cnx.rice.edu/mdml" id="m1">
  <title>Cake</title>
  <metadata>
    <md:title>The Cake</md:title>
    <md:abstract>On baking.</md:abstract>
    <md:actors>
      <md:person userid="glados">
        <md:fullname>GLaDOS</md:fullname>
        <md:email>glados@example.com</md:email>
      </md:person>
      <md:organization userid="aperture">
        <md:fullname>Aperture Science</md:fullname>
        <md:shortname>Aperture</md:shortname>
      </md:organization>
    </md:actors>
    <md:roles>
      <md:role type="maintainer">glados</md:role>
      <md:role type="author">aperture glados nobody</md:role>
    </md:roles>
  </metadata>
  <content><para>Hi</para></content>
</document>"#;

    #[test]
    fn test_module_title_and_content_root() {
        let doc = CnxmlParser::new().parse(SAMPLE).unwrap();
        let module = Module::new("m1", doc);
        assert_eq!(module.title(), Some("Cake".to_owned()));
        assert!(module.content_root().is_some());
    }

    #[test]
    fn test_content_root_respects_namespace() {
        let doc = CnxmlParser::new().parse(SAMPLE).unwrap();
        let module = Module::new("m1", doc).with_cnxml_namespace("urn:other");
        assert_eq!(module.content_root(), None);
        assert_eq!(module.title(), None);
    }

    #[test]
    fn test_metadata_from_document() {
        let doc = CnxmlParser::new().parse(SAMPLE).unwrap();
        let metadata = Metadata::from_document(&doc, CNXML_NAMESPACE).unwrap();

        assert_eq!(metadata.title.as_deref(), Some("The Cake"));
        assert_eq!(metadata.summary.as_deref(), Some("On baking."));
        let names: Vec<_> = metadata.authors.iter().map(Actor::full_name).collect();
        assert_eq!(names, vec![Some("Aperture Science"), Some("GLaDOS")]);
        assert_eq!(
            metadata.authors[1],
            Actor::Person(Person {
                full_name: Some("GLaDOS".to_owned()),
                email: Some("glados@example.com".to_owned()),
                ..Person::default()
            })
        );
    }

    #[test]
    fn test_metadata_absent() {
        let doc = CnxmlParser::new()
            .parse(r#"<document xmlns="http://cnx.rice.edu/cnxml"><content/></document>"#)
            .unwrap();
        assert_eq!(Metadata::from_document(&doc, CNXML_NAMESPACE), None);
    }

    #[test]
    fn test_resources_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("graph one.png"), b"png").unwrap();
        std::fs::write(dir.path().join("data.csv"), b"1,2").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let resources = Resources::from_dir(dir.path()).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources.get("graph one.png"), Some("graph%20one.png"));
        assert_eq!(resources.get("data.csv"), Some("data.csv"));
        assert_eq!(resources.get("nested"), None);
    }
}
