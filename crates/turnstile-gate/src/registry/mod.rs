//! Policy registry and catalog.
//!
//! The registry maps policy keys (what callers ask for) to policy
//! identifiers (what configuration names). The catalog maps identifiers to
//! typed factories compiled into the binary.

pub mod bindings;
pub mod catalog;

pub use bindings::{PolicyRegistry, RegistryBuilder};
pub use catalog::{PolicyCatalog, PolicyFactory};
