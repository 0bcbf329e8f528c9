//! Whole-document processors applied before generation.

use std::sync::Arc;
use std::time::Instant;

use crate::error::ProcessError;
use crate::link_processor::{LinkProcessor, LinkResolver};
use crate::module::Module;

/// A transform over a whole module.
///
/// Processors take the module by value and hand back the (possibly modified)
/// module. A failure aborts the render.
pub trait Processor: Send + Sync {
    /// Name used in configuration and logs.
    fn name(&self) -> &str;

    fn process(&self, module: Module) -> Result<Module, ProcessError>;
}

/// Ordered list of processors.
#[derive(Default)]
pub struct ProcessorChain {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor to the end of the chain.
    #[must_use]
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Build a chain from configured processor names, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::UnknownProcessor`] for a name with no built-in
    /// processor.
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
        resolver: &Arc<dyn LinkResolver>,
    ) -> Result<Self, ProcessError> {
        let mut chain = Self::new();
        for name in names {
            match name.as_ref() {
                LinkProcessor::NAME => {
                    chain = chain.with(LinkProcessor::new(Arc::clone(resolver)));
                }
                other => return Err(ProcessError::UnknownProcessor(other.to_owned())),
            }
        }
        Ok(chain)
    }

    /// Processor names in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(|p| p.name())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run every processor in order.
    ///
    /// # Errors
    ///
    /// Returns the first processor failure; later processors do not run.
    pub fn apply(&self, mut module: Module) -> Result<Module, ProcessError> {
        let start = Instant::now();
        for processor in &self.processors {
            module = processor.process(module)?;
        }
        tracing::debug!(
            count = self.processors.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Processors applied"
        );
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::ElementBuilder;
    use crate::mock::MockResolver;

    /// Records its name into a shared log when run.
    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Processor for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn process(&self, module: Module) -> Result<Module, ProcessError> {
            self.log.lock().unwrap().push(self.name);
            Ok(module)
        }
    }

    struct Failing;

    impl Processor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn process(&self, _module: Module) -> Result<Module, ProcessError> {
            Err(ProcessError::Failed {
                processor: "failing".to_owned(),
                message: "boom".to_owned(),
            })
        }
    }

    fn module() -> Module {
        Module::new("m1", ElementBuilder::new(None, "document").build())
    }

    #[test]
    fn test_apply_runs_in_given_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = ProcessorChain::new()
            .with(Recording {
                name: "second",
                log: Arc::clone(&log),
            })
            .with(Recording {
                name: "first",
                log: Arc::clone(&log),
            });

        chain.apply(module()).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["second", "first"]);
        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["second", "first"]);
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = ProcessorChain::new().with(Failing).with(Recording {
            name: "after",
            log: Arc::clone(&log),
        });

        let result = chain.apply(module());
        assert!(matches!(result, Err(ProcessError::Failed { .. })));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_names() {
        let resolver: Arc<dyn LinkResolver> = Arc::new(MockResolver::new());
        let chain = ProcessorChain::from_names(&["links"], &resolver).unwrap();
        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["links"]);

        let empty = ProcessorChain::from_names::<&str>(&[], &resolver).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_from_names_unknown() {
        let resolver: Arc<dyn LinkResolver> = Arc::new(MockResolver::new());
        let result = ProcessorChain::from_names(&["links", "mathml"], &resolver);
        assert!(matches!(result, Err(ProcessError::UnknownProcessor(name)) if name == "mathml"));
    }
}
