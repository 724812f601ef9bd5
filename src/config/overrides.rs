use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::path::Path;

use super::KEY_APP_MODE;
use super::env::EnvSettings;
use super::properties::parse_properties;

/// Read an override mapping from a properties file.
pub fn load_overrides(path: &Path) -> Result<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read override file {}", path.display()))?;
    let entries = parse_properties(&raw)
        .with_context(|| format!("parse override file {}", path.display()))?;
    Ok(entries)
}

/// Parse a single `key=value` pair as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("empty key in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Overrides sourced from the environment.
pub fn env_overrides(env: &EnvSettings) -> HashMap<String, String> {
    let mut out = HashMap::new();
    if let Some(mode) = &env.mode {
        out.insert(KEY_APP_MODE.to_string(), mode.clone());
    }
    out
}
