use turnstile_core::{Policy, PolicyData, Subject, SubjectExt, Verdict};

/// Passes when the data object's `user_id` names the subject.
#[derive(Debug, Default)]
pub struct OwnsResource;

impl<S: Subject + ?Sized> Policy<S> for OwnsResource {
    fn evaluate(&self, subject: &S, data: &PolicyData) -> Verdict {
        if subject.owns(data) {
            Verdict::Allow
        } else {
            Verdict::deny("not_owner")
        }
    }
}
