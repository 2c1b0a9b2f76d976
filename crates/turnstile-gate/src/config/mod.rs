//! Loads `turnstile.yaml`: the policy binding table, the server section and
//! the roles and subjects seeded into the in-memory directory.
//!
//! Parsing is strict (unknown fields fail) and every loaded config is
//! validated before it is returned.

pub mod schema;

use std::fs;

use turnstile_core::error::{Result, TurnstileError};

pub use schema::{PolicyBinding, ServerSection, SubjectConfig, TurnstileConfig};

pub fn load_from_file(path: &str) -> Result<TurnstileConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TurnstileError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TurnstileConfig> {
    let cfg: TurnstileConfig = serde_yaml::from_str(s)
        .map_err(|e| TurnstileError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
