//! Subject capabilities: identity, role membership and ownership.
//!
//! The acting entity and its role relations live in the embedding
//! application; this module only fixes the shapes the checks need.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Result, TurnstileError};

/// Field read from JSON objects to find their owner.
pub const OWNER_FIELD: &str = "user_id";

/// Identity of a subject.
///
/// Stored as text so numeric and string ids compare equal (`7 == "7"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Loose conversion from a JSON scalar; objects, arrays and null yield `None`.
    ///
    /// Integral floats are written without a fraction, so `7.0` and `7` agree.
    pub fn from_json(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(number_text(n))),
            Value::Bool(b) => Some(Self(b.to_string())),
            _ => None,
        }
    }
}

fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for SubjectId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named role. Two roles are the same role iff their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role {
    name: String,
}

impl Role {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Role argument: either a name still to be resolved, or a resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRef {
    Name(String),
    Resolved(Role),
}

impl From<&str> for RoleRef {
    fn from(s: &str) -> Self {
        RoleRef::Name(s.to_string())
    }
}

impl From<String> for RoleRef {
    fn from(s: String) -> Self {
        RoleRef::Name(s)
    }
}

impl From<Role> for RoleRef {
    fn from(r: Role) -> Self {
        RoleRef::Resolved(r)
    }
}

impl From<&Role> for RoleRef {
    fn from(r: &Role) -> Self {
        RoleRef::Resolved(r.clone())
    }
}

/// External lookup of roles by name (e.g. a persisted role table).
pub trait RoleDirectory: Send + Sync {
    /// Fails with [`TurnstileError::RoleNotFound`] when no role has this name.
    fn find_role(&self, name: &str) -> Result<Role>;
}

/// The actor being authorized.
pub trait Subject {
    fn id(&self) -> SubjectId;

    fn roles(&self) -> &[Role];

    fn has_role(&self, role: &Role) -> bool {
        self.roles().contains(role)
    }
}

/// Objects that may name an owning subject.
pub trait Owned {
    /// `None` when the object carries no owner field.
    fn owner_id(&self) -> Option<SubjectId>;
}

impl Owned for Map<String, Value> {
    fn owner_id(&self) -> Option<SubjectId> {
        self.get(OWNER_FIELD).and_then(SubjectId::from_json)
    }
}

impl Owned for Value {
    fn owner_id(&self) -> Option<SubjectId> {
        self.as_object().and_then(|m| m.owner_id())
    }
}

/// Ownership and role checks, available on every [`Subject`].
pub trait SubjectExt: Subject {
    /// True iff `object` names an owner and it is this subject.
    fn owns<O: Owned + ?Sized>(&self, object: &O) -> bool {
        match object.owner_id() {
            Some(owner) => owner == self.id(),
            None => false,
        }
    }

    /// Role membership. Names are resolved through `directory` first and a
    /// miss propagates as [`TurnstileError::RoleNotFound`].
    fn is_a<D>(&self, directory: &D, role: impl Into<RoleRef>) -> Result<bool>
    where
        D: RoleDirectory + ?Sized,
    {
        let role = match role.into() {
            RoleRef::Name(name) => directory.find_role(&name)?,
            RoleRef::Resolved(role) => role,
        };
        Ok(self.has_role(&role))
    }

    /// Same as [`SubjectExt::is_a`].
    fn is_an<D>(&self, directory: &D, role: impl Into<RoleRef>) -> Result<bool>
    where
        D: RoleDirectory + ?Sized,
    {
        self.is_a(directory, role)
    }
}

impl<S: Subject + ?Sized> SubjectExt for S {}

/// Convenience for directories backed by a plain list of roles.
pub fn find_in<'a, I>(roles: I, name: &str) -> Result<Role>
where
    I: IntoIterator<Item = &'a Role>,
{
    roles
        .into_iter()
        .find(|r| r.name() == name)
        .cloned()
        .ok_or_else(|| TurnstileError::RoleNotFound {
            name: name.to_string(),
        })
}
