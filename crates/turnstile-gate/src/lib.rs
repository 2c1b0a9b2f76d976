//! turnstile gate library entry.
//!
//! Wires the policy registry, catalog and evaluator together, and exposes
//! the configuration loader and HTTP surface used by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod directory;
pub mod gate;
pub mod http;
pub mod policies;
pub mod registry;
pub mod router;

pub use gate::{Authorizer, Gate};
pub use registry::{PolicyCatalog, PolicyRegistry};
