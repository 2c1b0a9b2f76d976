//! Policy contract and evaluation outcome.
//!
//! A policy is a unit of authorization logic. It receives the subject and a
//! free-form JSON object and answers with a [`Verdict`]. A denial carries an
//! opaque [`FailureReason`] so callers can tell the user *why* without a
//! shared side channel.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form payload handed to a policy (`{}` when the caller has nothing).
pub type PolicyData = Map<String, Value>;

/// Opaque detail attached to a denial (e.g. `"already_taken"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureReason(pub Value);

impl FailureReason {
    pub fn new(v: impl Into<Value>) -> Self {
        Self(v.into())
    }

    /// The payload as a string, when it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<&str> for FailureReason {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for FailureReason {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<Value> for FailureReason {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Outcome of a single policy evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Allow,
    Deny(FailureReason),
}

impl Verdict {
    pub fn deny(reason: impl Into<FailureReason>) -> Self {
        Verdict::Deny(reason.into())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Verdict::Allow => None,
            Verdict::Deny(r) => Some(r),
        }
    }

    pub fn into_failure(self) -> Option<FailureReason> {
        match self {
            Verdict::Allow => None,
            Verdict::Deny(r) => Some(r),
        }
    }
}

impl From<bool> for Verdict {
    /// `false` carries a `false` payload, mirroring a policy that returned it.
    fn from(allowed: bool) -> Self {
        if allowed {
            Verdict::Allow
        } else {
            Verdict::Deny(FailureReason(Value::Bool(false)))
        }
    }
}

/// Authorization logic selected by a registry key.
///
/// Implementations are built fresh for each evaluation and dropped right
/// after, so they may hold per-call state but nothing should outlive the call.
pub trait Policy<S: ?Sized>: Send + Sync {
    fn evaluate(&self, subject: &S, data: &PolicyData) -> Verdict;
}

impl<S: ?Sized, F> Policy<S> for F
where
    F: Fn(&S, &PolicyData) -> Verdict + Send + Sync,
{
    fn evaluate(&self, subject: &S, data: &PolicyData) -> Verdict {
        self(subject, data)
    }
}
