//! Turnstile: policy-based authorization for application subjects.
//!
//! Depend on this crate alone and pull the common names from [`prelude`]:
//!
//! ```ignore
//! use turnstile::prelude::*;
//!
//! let registry = PolicyRegistry::from_bindings([("register", "allow_all")])?;
//! let gate = Gate::new(registry, builtin_catalog());
//! let allowed = gate.can_with_defaults(&account, "register")?;
//! ```

pub mod core {
    pub use turnstile_core::*;
}

pub mod gate {
    pub use turnstile_gate::*;
}

/// Types most embedders need: the evaluator, the policy contract and the
/// subject capabilities.
pub mod prelude {
    pub use turnstile_core::{
        FailureReason, Owned, Policy, PolicyData, Result, Role, RoleDirectory, RoleRef, Subject,
        SubjectExt, SubjectId, TurnstileError, Verdict,
    };
    pub use turnstile_gate::policies::builtin_catalog;
    pub use turnstile_gate::{Authorizer, Gate, PolicyCatalog, PolicyRegistry};
}
