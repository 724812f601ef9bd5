use arc_swap::ArcSwap;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::properties::parse_properties;
use super::{KEY_APP_LOCALE, KEY_APP_MODE};
use crate::error::{ConfigError, ConfigResult};

/// Immutable key/value view of the settings at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    entries: HashMap<String, String>,
}

impl SettingsSnapshot {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// New snapshot with `overrides` merged on top.
    fn merged<I, K, V>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = self.entries.clone();
        entries.extend(
            overrides
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        Self { entries }
    }
}

/// Process-wide settings: a base properties source plus runtime overrides.
///
/// Reads go through an atomically swapped snapshot pointer, so a reader sees
/// either the state before an override or after it, never a mix.
#[derive(Debug)]
pub struct SettingsStore {
    current: ArcSwap<SettingsSnapshot>,
    source: Option<PathBuf>,
}

impl SettingsStore {
    /// Load the base source from a properties file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = parse_properties(&raw).map_err(|err| match err {
            ConfigError::Syntax { line, message } => ConfigError::Parse {
                path: path.to_path_buf(),
                line,
                message,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "loaded base settings");
        Ok(Self {
            current: ArcSwap::from_pointee(SettingsSnapshot::new(entries)),
            source: Some(path.to_path_buf()),
        })
    }

    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            current: ArcSwap::from_pointee(SettingsSnapshot::new(entries)),
            source: None,
        }
    }

    /// Path of the base source, if it was loaded from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Raw lookup. Empty values are returned as-is.
    pub fn get(&self, key: &str) -> Option<String> {
        self.current.load().get(key).map(str::to_string)
    }

    /// Lookup falling back to `default` when the key is absent or blank.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.non_blank(key).unwrap_or_else(|| default.to_string())
    }

    /// Like [`get_or`](Self::get_or) but with no default: `None` when absent
    /// or blank.
    pub fn non_blank(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.lookup_int(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.lookup_bool(key).unwrap_or(default)
    }

    fn lookup_int(&self, key: &str) -> Option<i64> {
        let raw = self.get(key)?;
        match raw.parse::<i64>() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(key, value = %raw, error = %err, "setting is not an integer");
                None
            }
        }
    }

    fn lookup_bool(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            tracing::debug!(key, value = %raw, "setting is not a boolean");
            None
        }
    }

    /// Merge `overrides` over the current settings, last write wins.
    ///
    /// Concurrent callers are serialized through `rcu`, so no override is
    /// lost when two land at once.
    pub fn apply_overrides<I, K, V>(&self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let overrides: Vec<(String, String)> = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if overrides.is_empty() {
            return;
        }
        let count = overrides.len();
        self.current
            .rcu(|snapshot| snapshot.merged(overrides.iter().cloned()));
        tracing::debug!(count, "applied settings overrides");
    }

    /// Read-only view of the current settings.
    pub fn snapshot_all(&self) -> Arc<SettingsSnapshot> {
        self.current.load_full()
    }

    /// Log a summary of the loaded settings at startup.
    pub fn log_startup_summary(&self) {
        let snapshot = self.current.load();
        tracing::info!(
            source = ?self.source,
            keys = snapshot.len(),
            mode = snapshot.get(KEY_APP_MODE).unwrap_or("dev"),
            locale = snapshot.get(KEY_APP_LOCALE).unwrap_or("<unset>"),
            "resolved settings"
        );
    }
}

/// Build a store from an in-memory properties document.
impl FromStr for SettingsStore {
    type Err = ConfigError;

    fn from_str(input: &str) -> ConfigResult<Self> {
        Ok(Self::from_entries(parse_properties(input)?))
    }
}
