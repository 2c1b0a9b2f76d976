//! Ownership and role checks.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use turnstile_core::subject::find_in;
use turnstile_core::{Result, Role, RoleDirectory, Subject, SubjectExt, SubjectId};

struct User {
    id: u64,
    roles: Vec<Role>,
}

impl Subject for User {
    fn id(&self) -> SubjectId {
        SubjectId::from(self.id)
    }

    fn roles(&self) -> &[Role] {
        &self.roles
    }
}

struct Roles(Vec<Role>);

impl RoleDirectory for Roles {
    fn find_role(&self, name: &str) -> Result<Role> {
        find_in(&self.0, name)
    }
}

fn editor() -> User {
    User {
        id: 7,
        roles: vec![Role::named("editor")],
    }
}

fn directory() -> Roles {
    Roles(vec![Role::named("admin"), Role::named("editor")])
}

#[test]
fn owns_matches_user_id() {
    let u = editor();
    assert!(u.owns(&json!({ "user_id": 7, "title": "post" })));
    assert!(u.owns(&json!({ "user_id": "7" })));
}

#[test]
fn owns_treats_integral_float_as_integer() {
    let u = editor();
    assert!(u.owns(&json!({ "user_id": 7.0 })));
    assert!(!u.owns(&json!({ "user_id": 7.5 })));
    assert_eq!(SubjectId::from_json(&json!(7.0)), Some(SubjectId::from(7)));
}

#[test]
fn owns_false_when_field_absent_or_different() {
    let u = editor();
    assert!(!u.owns(&json!({ "title": "post" })));
    assert!(!u.owns(&json!({ "user_id": 8 })));
    assert!(!u.owns(&json!({ "user_id": null })));
    assert!(!u.owns(&json!("not an object")));
}

#[test]
fn is_a_resolves_name_through_directory() {
    let u = editor();
    let dir = directory();
    assert!(u.is_a(&dir, "editor").unwrap());
    assert!(!u.is_a(&dir, "admin").unwrap());
}

#[test]
fn is_an_matches_is_a() {
    let u = editor();
    let dir = directory();
    for role in ["admin", "editor"] {
        assert_eq!(u.is_a(&dir, role).unwrap(), u.is_an(&dir, role).unwrap());
    }
}

#[test]
fn is_a_propagates_unknown_role() {
    let u = editor();
    let err = u.is_a(&directory(), "wizard").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "ROLE_NOT_FOUND");
    assert!(err.to_string().contains("wizard"));
}

#[test]
fn is_a_accepts_resolved_role_without_lookup() {
    let u = editor();
    // Empty directory: a resolved role never hits it.
    let empty = Roles(Vec::new());
    assert!(u.is_a(&empty, Role::named("editor")).unwrap());
    assert!(!u.is_an(&empty, &Role::named("admin")).unwrap());
}
