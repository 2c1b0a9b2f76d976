use std::collections::HashMap;

use turnstile_core::error::{Result, TurnstileError};

/// Ordered `policy key -> policy identifier` table.
///
/// Built once at startup and shared read-only (wrap in `Arc`).
#[derive(Debug, Default, Clone)]
pub struct PolicyRegistry {
    order: Vec<String>,
    by_key: HashMap<String, String>,
}

impl PolicyRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Bulk construction from a static table. Keys must be unique and non-empty.
    pub fn from_bindings<I, K, P>(bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut b = Self::builder();
        for (key, policy) in bindings {
            b = b.bind(key, policy)?;
        }
        Ok(b.build())
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.by_key
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TurnstileError::PolicyNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Keys in binding order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(key, policy identifier)` pairs in binding order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|k| self.by_key.get(k).map(|p| (k.as_str(), p.as_str())))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    inner: PolicyRegistry,
}

impl RegistryBuilder {
    pub fn bind(mut self, key: impl Into<String>, policy: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let policy = policy.into();
        if key.is_empty() {
            return Err(TurnstileError::BadRequest("policy key must not be empty".into()));
        }
        if policy.is_empty() {
            return Err(TurnstileError::BadRequest(format!(
                "policy identifier for key {key} must not be empty"
            )));
        }
        if self.inner.by_key.contains_key(&key) {
            return Err(TurnstileError::BadRequest(format!("duplicate policy key: {key}")));
        }
        self.inner.order.push(key.clone());
        self.inner.by_key.insert(key, policy);
        Ok(self)
    }

    pub fn build(self) -> PolicyRegistry {
        self.inner
    }
}
