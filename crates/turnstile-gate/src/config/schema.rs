use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use turnstile_core::error::{Result, TurnstileError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TurnstileConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub policies: Vec<PolicyBinding>,

    /// Roles known to the in-memory directory.
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub subjects: Vec<SubjectConfig>,
}

impl TurnstileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TurnstileError::UnsupportedVersion);
        }
        if self.policies.is_empty() {
            return Err(TurnstileError::BadRequest("policies must not be empty".into()));
        }

        self.server.validate()?;

        let mut keys = HashSet::new();
        for p in &self.policies {
            if p.key.is_empty() || p.policy.is_empty() {
                return Err(TurnstileError::BadRequest(
                    "policies entries need a non-empty key and policy".into(),
                ));
            }
            if !keys.insert(p.key.as_str()) {
                return Err(TurnstileError::BadRequest(format!(
                    "duplicate policy key: {}",
                    p.key
                )));
            }
        }

        let roles: HashSet<&str> = self.roles.iter().map(String::as_str).collect();
        if roles.len() != self.roles.len() {
            return Err(TurnstileError::BadRequest("roles must be unique".into()));
        }

        let mut ids = HashSet::new();
        for s in &self.subjects {
            if !ids.insert(s.id.as_str()) {
                return Err(TurnstileError::BadRequest(format!(
                    "duplicate subject id: {}",
                    s.id
                )));
            }
            if let Some(r) = s.roles.iter().find(|r| !roles.contains(r.as_str())) {
                return Err(TurnstileError::BadRequest(format!(
                    "subject {} refers to undeclared role: {r}",
                    s.id
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Refuse to boot when a policy binding names an unknown implementation.
    #[serde(default)]
    pub fail_fast_on_unbound: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            fail_fast_on_unbound: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            TurnstileError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyBinding {
    pub key: String,
    pub policy: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
