use std::sync::Arc;

use dashmap::DashMap;

use turnstile_core::error::Result;
use turnstile_core::Policy;

/// Builds a fresh policy instance for one evaluation.
pub type PolicyFactory<S> = Arc<dyn Fn() -> Result<Box<dyn Policy<S>>> + Send + Sync>;

/// Known policy implementations, by identifier.
///
/// Registry bindings point at these identifiers; the gate asks the catalog
/// to build an instance each time a key is evaluated.
pub struct PolicyCatalog<S: ?Sized> {
    factories: DashMap<String, PolicyFactory<S>>,
}

impl<S: ?Sized + 'static> Default for PolicyCatalog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + 'static> PolicyCatalog<S> {
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Register (or replace) the factory for `id`.
    pub fn register<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn Policy<S>>> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
    }

    /// Register a policy type that needs no construction arguments.
    pub fn register_default<P>(&self, id: impl Into<String>)
    where
        P: Policy<S> + Default + 'static,
    {
        self.register(id, || Ok(Box::new(P::default()) as Box<dyn Policy<S>>));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn registered_ids(&self) -> Vec<String> {
        self.factories.iter().map(|e| e.key().clone()).collect()
    }

    /// `None` when nothing is registered under `id`.
    pub fn build(&self, id: &str) -> Option<Result<Box<dyn Policy<S>>>> {
        // Clone the factory out so the shard lock is not held while it runs.
        let factory = self.factories.get(id)?.value().clone();
        Some(factory())
    }
}
