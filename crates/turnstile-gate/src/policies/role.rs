use turnstile_core::{Policy, PolicyData, Role, Subject, Verdict};

/// Passes when the subject holds the role named by the `role` field.
#[derive(Debug, Default)]
pub struct HasRole;

impl<S: Subject + ?Sized> Policy<S> for HasRole {
    fn evaluate(&self, subject: &S, data: &PolicyData) -> Verdict {
        let Some(name) = data.get("role").and_then(|v| v.as_str()) else {
            return Verdict::deny("role_required");
        };
        if subject.has_role(&Role::named(name)) {
            Verdict::Allow
        } else {
            Verdict::deny("missing_role")
        }
    }
}
