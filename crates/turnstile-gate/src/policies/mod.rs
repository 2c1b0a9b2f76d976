//! Built-in policies shipped with the gate binary.
//!
//! Applications embedding the library register their own policies in a
//! [`PolicyCatalog`]; these cover the common cases so the stand-alone
//! service is useful out of the box.

pub mod ownership;
pub mod role;

use turnstile_core::{Policy, PolicyData, Subject, Verdict};

use crate::registry::PolicyCatalog;

pub use ownership::OwnsResource;
pub use role::HasRole;

/// Always passes.
#[derive(Debug, Default)]
pub struct AllowAll;

impl<S: ?Sized> Policy<S> for AllowAll {
    fn evaluate(&self, _subject: &S, _data: &PolicyData) -> Verdict {
        Verdict::Allow
    }
}

/// Catalog with `allow_all`, `owns_resource` and `has_role`.
pub fn builtin_catalog<S: Subject + ?Sized + 'static>() -> PolicyCatalog<S> {
    let catalog = PolicyCatalog::new();
    catalog.register_default::<AllowAll>("allow_all");
    catalog.register_default::<OwnsResource>("owns_resource");
    catalog.register_default::<HasRole>("has_role");
    catalog
}
