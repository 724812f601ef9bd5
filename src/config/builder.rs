use anyhow::{Context, Result};
use std::path::PathBuf;

use super::env::EnvSettings;
use super::overrides::{env_overrides, load_overrides, parse_assignment};
use super::store::SettingsStore;
use super::validation::validate_settings;

/// Builds a validated `SettingsStore` by layering:
/// base source → override files → env overrides → `key=value` assignments.
pub struct SettingsBuilder {
    base: PathBuf,
    override_files: Vec<PathBuf>,
    env: EnvSettings,
    assignments: Vec<String>,
}

impl SettingsBuilder {
    pub fn new(base: PathBuf) -> Self {
        Self {
            base,
            override_files: Vec::new(),
            env: EnvSettings::default(),
            assignments: Vec::new(),
        }
    }

    pub fn override_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.override_files.extend(files);
        self
    }

    /// Environment layer. Empty unless set.
    pub fn env(mut self, env: EnvSettings) -> Self {
        self.env = env;
        self
    }

    pub fn assignments(mut self, assignments: impl IntoIterator<Item = String>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    pub fn build(self) -> Result<SettingsStore> {
        let store = SettingsStore::load(&self.base)?;

        for path in &self.override_files {
            let overrides = load_overrides(path)?;
            tracing::debug!(path = %path.display(), count = overrides.len(), "override file");
            store.apply_overrides(overrides);
        }

        store.apply_overrides(env_overrides(&self.env));

        let assignments = self
            .assignments
            .iter()
            .map(String::as_str)
            .map(parse_assignment)
            .collect::<Result<Vec<_>>>()
            .context("invalid --set override")?;
        store.apply_overrides(assignments);

        validate_settings(&store)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn layers_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("application.properties");
        fs::write(&base, "application.locale=en\na=base\nb=base\nc=base\n").unwrap();
        let first = dir.path().join("first.properties");
        fs::write(&first, "a=first\nb=first\n").unwrap();
        let second = dir.path().join("second.properties");
        fs::write(&second, "b=second\n").unwrap();

        let store = SettingsBuilder::new(base)
            .override_files([first, second])
            .assignments(["c=cli".to_string()])
            .build()
            .unwrap();

        assert_eq!(store.get("a").as_deref(), Some("first"));
        assert_eq!(store.get("b").as_deref(), Some("second"));
        assert_eq!(store.get("c").as_deref(), Some("cli"));
    }

    #[test]
    fn env_mode_sits_between_files_and_assignments() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("application.properties");
        fs::write(&base, "application.locale=en\napplication.mode=dev\n").unwrap();
        let env = EnvSettings {
            mode: Some("prod".to_string()),
            ..EnvSettings::default()
        };

        let store = SettingsBuilder::new(base.clone())
            .env(env.clone())
            .build()
            .unwrap();
        assert_eq!(store.get("application.mode").as_deref(), Some("prod"));

        let store = SettingsBuilder::new(base)
            .env(env)
            .assignments(["application.mode=staging".to_string()])
            .build()
            .unwrap();
        assert_eq!(store.get("application.mode").as_deref(), Some("staging"));
    }

    #[test]
    fn assignments_keep_their_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("application.properties");
        fs::write(&base, "application.locale=en\n").unwrap();
        let store = SettingsBuilder::new(base)
            .assignments(["k=1".to_string(), "k=2".to_string()])
            .build()
            .unwrap();
        assert_eq!(store.get("k").as_deref(), Some("2"));
    }

    #[test]
    fn missing_base_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = SettingsBuilder::new(dir.path().join("application.properties")).build();
        assert!(result.is_err());
    }

    #[test]
    fn validation_runs_after_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("application.properties");
        fs::write(&base, "application.mode=prod\n").unwrap();

        assert!(SettingsBuilder::new(base.clone()).build().is_err());
        let store = SettingsBuilder::new(base)
            .assignments(["application.locale=de_DE".to_string()])
            .build()
            .unwrap();
        assert_eq!(store.get_or("application.locale", "en"), "de_DE");
    }

    #[test]
    fn malformed_assignment_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("application.properties");
        fs::write(&base, "application.locale=en\n").unwrap();
        let result = SettingsBuilder::new(base)
            .assignments(["oops".to_string()])
            .build();
        assert!(result.is_err());
    }
}
