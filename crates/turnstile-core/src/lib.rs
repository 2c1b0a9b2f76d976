//! Turnstile core: the policy contract, subject capabilities and error types.
//!
//! This crate carries no runtime, transport or config dependencies so it can
//! be implemented by any application that wants to plug its own user and
//! role model into the gate.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `TurnstileError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod policy;
pub mod subject;

/// Shared result type.
pub use error::{ClientCode, Result, TurnstileError};
pub use policy::{FailureReason, Policy, PolicyData, Verdict};
pub use subject::{Owned, Role, RoleDirectory, RoleRef, Subject, SubjectExt, SubjectId};
