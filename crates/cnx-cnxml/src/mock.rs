//! Mock link resolver for testing.
//!
//! Provides [`MockResolver`] for unit testing link resolution without a real
//! URL scheme.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::ResolveError;
use crate::link_processor::LinkResolver;

/// One recorded resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverCall {
    Uri(String),
    Document(Option<String>, Option<String>),
    Resource(Option<String>, Option<String>, String),
}

type DocumentKey = (Option<String>, Option<String>);

/// Mock resolver for testing.
///
/// Unconfigured URIs resolve to themselves, documents to
/// `/{document}/{version}/` and resources to `/resources/{name}`. Use the
/// builder methods to override specific answers.
///
/// # Example
///
/// ```ignore
/// use cnx_cnxml::{LinkResolver, MockResolver};
///
/// let resolver = MockResolver::new().with_resource("graph.png", "/r/graph.png");
/// assert_eq!(resolver.resolve_resource(None, None, "graph.png")?, "/r/graph.png");
/// ```
#[derive(Debug, Default)]
pub struct MockResolver {
    uris: HashMap<String, String>,
    documents: HashMap<DocumentKey, String>,
    resources: HashMap<String, String>,
    failing: bool,
    calls: RwLock<Vec<ResolverCall>>,
}

impl MockResolver {
    /// Create a mock that resolves everything to a default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>, target: impl Into<String>) -> Self {
        self.uris.insert(uri.into(), target.into());
        self
    }

    #[must_use]
    pub fn with_document(
        mut self,
        document: Option<&str>,
        version: Option<&str>,
        target: impl Into<String>,
    ) -> Self {
        let key = (document.map(str::to_owned), version.map(str::to_owned));
        self.documents.insert(key, target.into());
        self
    }

    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.resources.insert(name.into(), target.into());
        self
    }

    /// Make every call fail with [`ResolveError::Backend`].
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Calls received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<ResolverCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: ResolverCall) -> Result<(), ResolveError> {
        self.calls.write().unwrap().push(call);
        if self.failing {
            return Err(ResolveError::Backend("mock failure".to_owned()));
        }
        Ok(())
    }
}

impl LinkResolver for MockResolver {
    fn resolve_uri(&self, uri: &str) -> Result<String, ResolveError> {
        self.record(ResolverCall::Uri(uri.to_owned()))?;
        Ok(self.uris.get(uri).cloned().unwrap_or_else(|| uri.to_owned()))
    }

    fn resolve_document(
        &self,
        document: Option<&str>,
        version: Option<&str>,
    ) -> Result<String, ResolveError> {
        let key = (document.map(str::to_owned), version.map(str::to_owned));
        self.record(ResolverCall::Document(key.0.clone(), key.1.clone()))?;
        Ok(self.documents.get(&key).cloned().unwrap_or_else(|| {
            format!(
                "/{}/{}/",
                document.unwrap_or("self"),
                version.unwrap_or("latest")
            )
        }))
    }

    fn resolve_resource(
        &self,
        document: Option<&str>,
        version: Option<&str>,
        resource: &str,
    ) -> Result<String, ResolveError> {
        self.record(ResolverCall::Resource(
            document.map(str::to_owned),
            version.map(str::to_owned),
            resource.to_owned(),
        ))?;
        Ok(self
            .resources
            .get(resource)
            .cloned()
            .unwrap_or_else(|| format!("/resources/{resource}")))
    }
}
