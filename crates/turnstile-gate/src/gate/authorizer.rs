use turnstile_core::error::Result;
use turnstile_core::{FailureReason, PolicyData, Verdict};

use super::Gate;

/// Per-request view over a [`Gate`] with a "last failure" slot.
///
/// Create one per request (or per logical call chain). The slot belongs to
/// this value only, so concurrent requests never see each other's failures.
pub struct Authorizer<'g, S: ?Sized> {
    gate: &'g Gate<S>,
    last_failure: Option<FailureReason>,
}

impl<'g, S: ?Sized + 'static> Authorizer<'g, S> {
    pub fn new(gate: &'g Gate<S>) -> Self {
        Self {
            gate,
            last_failure: None,
        }
    }

    /// Allowed => `true`, slot untouched. Denied => `false`, slot overwritten.
    /// Errors leave the slot untouched.
    pub fn can(&mut self, subject: &S, key: &str, data: &PolicyData) -> Result<bool> {
        match self.gate.evaluate(subject, key, data)? {
            Verdict::Allow => Ok(true),
            Verdict::Deny(reason) => {
                self.last_failure = Some(reason);
                Ok(false)
            }
        }
    }

    pub fn last_failure(&self) -> Option<&FailureReason> {
        self.last_failure.as_ref()
    }

    pub fn take_failure(&mut self) -> Option<FailureReason> {
        self.last_failure.take()
    }
}
