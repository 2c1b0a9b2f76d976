use std::collections::HashMap;

use turnstile_core::error::{Result, TurnstileError};
use turnstile_core::subject::find_in;
use turnstile_core::{Role, RoleDirectory, Subject, SubjectId};

use crate::config::TurnstileConfig;

/// Subject record held by [`MemoryDirectory`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: SubjectId,
    pub roles: Vec<Role>,
}

impl Account {
    pub fn new(id: impl Into<SubjectId>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id: id.into(),
            roles: roles.into_iter().collect(),
        }
    }
}

impl Subject for Account {
    fn id(&self) -> SubjectId {
        self.id.clone()
    }

    fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// Roles and subjects loaded from configuration.
/// Stands in for the application's user/role tables.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    roles: Vec<Role>,
    subjects: HashMap<SubjectId, Account>,
}

impl MemoryDirectory {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            subjects: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &TurnstileConfig) -> Result<Self> {
        let mut dir = Self::new(cfg.roles.iter().map(Role::named));
        for s in &cfg.subjects {
            let roles = s
                .roles
                .iter()
                .map(|r| dir.find_role(r))
                .collect::<Result<Vec<_>>>()?;
            dir.insert(Account::new(s.id.as_str(), roles));
        }
        Ok(dir)
    }

    pub fn insert(&mut self, account: Account) {
        self.subjects.insert(account.id.clone(), account);
    }

    pub fn subject(&self, id: &str) -> Result<&Account> {
        self.subjects
            .get(&SubjectId::from(id))
            .ok_or_else(|| TurnstileError::SubjectNotFound(id.to_string()))
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

impl RoleDirectory for MemoryDirectory {
    fn find_role(&self, name: &str) -> Result<Role> {
        find_in(&self.roles, name)
    }
}
