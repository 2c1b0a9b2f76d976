use std::sync::Arc;

use turnstile_core::error::{Result, TurnstileError};
use turnstile_core::{PolicyData, Verdict};

use crate::registry::{PolicyCatalog, PolicyRegistry};

use super::Authorizer;

/// Policy evaluator.
/// Construct once at startup, then clone freely (all state is behind `Arc`).
pub struct Gate<S: ?Sized> {
    registry: Arc<PolicyRegistry>,
    catalog: Arc<PolicyCatalog<S>>,
}

impl<S: ?Sized> Clone for Gate<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<S: ?Sized + 'static> Gate<S> {
    pub fn new(registry: PolicyRegistry, catalog: PolicyCatalog<S>) -> Self {
        Self {
            registry: Arc::new(registry),
            catalog: Arc::new(catalog),
        }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Registry keys whose policy identifier has no factory in the catalog.
    pub fn unbound_keys(&self) -> Vec<(String, String)> {
        self.registry
            .bindings()
            .filter(|(_, policy)| !self.catalog.contains(policy))
            .map(|(k, p)| (k.to_string(), p.to_string()))
            .collect()
    }

    /// Resolve `key`, build its policy and run it against `subject`.
    ///
    /// A denial is `Ok(Verdict::Deny(..))`. Errors mean the policy could not
    /// be run: the key is unknown, or its implementation could not be built.
    pub fn evaluate(&self, subject: &S, key: &str, data: &PolicyData) -> Result<Verdict> {
        let policy_id = self.registry.get(key)?;

        let policy = match self.catalog.build(policy_id) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                tracing::warn!(key, policy = policy_id, error = %e, "policy construction failed");
                return Err(TurnstileError::PolicyUnavailable {
                    key: key.to_string(),
                    policy: policy_id.to_string(),
                    reason: e.to_string(),
                });
            }
            None => {
                tracing::warn!(key, policy = policy_id, "policy identifier not in catalog");
                return Err(TurnstileError::PolicyUnavailable {
                    key: key.to_string(),
                    policy: policy_id.to_string(),
                    reason: "no implementation registered".into(),
                });
            }
        };

        let verdict = policy.evaluate(subject, data);
        match &verdict {
            Verdict::Allow => tracing::debug!(key, policy = policy_id, "policy allowed"),
            Verdict::Deny(reason) => {
                tracing::debug!(key, policy = policy_id, %reason, "policy denied")
            }
        }
        Ok(verdict)
    }

    /// [`Gate::evaluate`] collapsed to a bool; the failure detail is dropped.
    pub fn can(&self, subject: &S, key: &str, data: &PolicyData) -> Result<bool> {
        Ok(self.evaluate(subject, key, data)?.is_allowed())
    }

    pub fn can_with_defaults(&self, subject: &S, key: &str) -> Result<bool> {
        self.can(subject, key, &PolicyData::new())
    }

    /// Request-scoped handle that remembers the last denial.
    pub fn authorizer(&self) -> Authorizer<'_, S> {
        Authorizer::new(self)
    }
}
