//! Policy evaluation.
//!
//! `Gate` is the process-wide evaluator; `Authorizer` is a cheap
//! request-scoped wrapper for callers that want to read the reason of the
//! last denial after a boolean check.

pub mod authorizer;
pub mod evaluator;

pub use authorizer::Authorizer;
pub use evaluator::Gate;
