//! Shared application state for the turnstile service.
//!
//! Builds the process-wide `Gate` from configuration and checks that every
//! policy binding points at an implementation the binary actually ships.

use std::sync::Arc;

use turnstile_core::error::{Result, TurnstileError};

use crate::config::TurnstileConfig;
use crate::directory::{Account, MemoryDirectory};
use crate::gate::Gate;
use crate::policies;
use crate::registry::{PolicyCatalog, PolicyRegistry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    gate: Gate<Account>,
}

struct AppStateInner {
    cfg: TurnstileConfig,
    directory: MemoryDirectory,
}

impl AppState {
    /// Build state with the built-in policy catalog.
    pub fn new(cfg: TurnstileConfig) -> Result<Self> {
        Self::with_catalog(cfg, policies::builtin_catalog())
    }

    /// Returns Result so main can report bad bindings instead of panicking.
    pub fn with_catalog(cfg: TurnstileConfig, catalog: PolicyCatalog<Account>) -> Result<Self> {
        // 1) Registry from the static binding table
        let registry = PolicyRegistry::from_bindings(
            cfg.policies.iter().map(|b| (b.key.as_str(), b.policy.as_str())),
        )?;

        // 2) Subjects and roles
        let directory = MemoryDirectory::from_config(&cfg)?;

        let gate = Gate::new(registry, catalog);

        // bindings <-> catalog sanity check
        for (key, policy) in gate.unbound_keys() {
            tracing::warn!(
                key = %key,
                policy = %policy,
                "policy binding refers to unregistered implementation"
            );
            if cfg.server.fail_fast_on_unbound {
                return Err(TurnstileError::BadRequest(format!(
                    "policy {key} references unregistered implementation: {policy}"
                )));
            }
        }

        tracing::info!(
            policies = gate.registry().len(),
            subjects = cfg.subjects.len(),
            "turnstile state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, directory }),
            gate,
        })
    }

    pub fn cfg(&self) -> &TurnstileConfig {
        &self.inner.cfg
    }

    pub fn gate(&self) -> &Gate<Account> {
        &self.gate
    }

    pub fn directory(&self) -> &MemoryDirectory {
        &self.inner.directory
    }
}
