use std::fmt;

use crate::config::{KEY_APP_MODE, SettingsStore};
use crate::probe::ResourceProbe;

/// Minified production bundle, relative to the web root.
pub const APP_BUNDLE_OPTIMIZED: &str = "js/application-all.min.js";
/// Unminified development bundle, relative to the web root.
pub const APP_BUNDLE_DEV: &str = "js/application.js";

/// Run mode used when `application.mode` is not configured.
pub const DEFAULT_RUN_MODE: &str = "dev";

/// `dev`, or anything else (treated as production).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Dev,
    Prod(String),
}

impl RunMode {
    pub fn parse(raw: &str) -> Self {
        if raw == "dev" {
            Self::Dev
        } else {
            Self::Prod(raw.to_string())
        }
    }

    /// Run mode from `application.mode`, defaulting to `dev`.
    pub fn from_settings(store: &SettingsStore) -> Self {
        Self::parse(&store.get_or(KEY_APP_MODE, DEFAULT_RUN_MODE))
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dev => "dev",
            Self::Prod(raw) => raw,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the application bundle to serve.
///
/// Dev mode always gets the development bundle. Otherwise the minified
/// bundle is used when it is deployed; a missing one falls back to dev.
pub fn select_app_bundle<P>(mode: &RunMode, probe: &P) -> &'static str
where
    P: ResourceProbe + ?Sized,
{
    if mode.is_dev() {
        return APP_BUNDLE_DEV;
    }
    if probe.exists(&format!("/{APP_BUNDLE_OPTIMIZED}")) {
        APP_BUNDLE_OPTIMIZED
    } else {
        tracing::warn!(mode = %mode, "optimized bundle missing; serving development bundle");
        APP_BUNDLE_DEV
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticProbe;

    #[test]
    fn dev_ignores_probe() {
        let everything = |_: &str| true;
        let nothing = |_: &str| false;
        assert_eq!(select_app_bundle(&RunMode::Dev, &everything), APP_BUNDLE_DEV);
        assert_eq!(select_app_bundle(&RunMode::Dev, &nothing), APP_BUNDLE_DEV);
    }

    #[test]
    fn prod_uses_optimized_iff_present() {
        let prod = RunMode::parse("prod");
        let deployed = StaticProbe::new(["/js/application-all.min.js"]);
        assert_eq!(select_app_bundle(&prod, &deployed), APP_BUNDLE_OPTIMIZED);
        assert_eq!(select_app_bundle(&prod, &StaticProbe::default()), APP_BUNDLE_DEV);
    }

    #[test]
    fn any_other_mode_is_not_dev() {
        let mode = RunMode::parse("Dev");
        assert!(!mode.is_dev());
        assert_eq!(mode.as_str(), "Dev");
        let deployed = StaticProbe::new(["/js/application-all.min.js"]);
        assert_eq!(select_app_bundle(&mode, &deployed), APP_BUNDLE_OPTIMIZED);
    }

    #[test]
    fn unconfigured_mode_defaults_to_dev() {
        let store: SettingsStore = "application.locale=en\napplication.mode=  \n"
            .parse()
            .unwrap();
        assert_eq!(RunMode::from_settings(&store), RunMode::Dev);
        assert_eq!(RunMode::default(), RunMode::Dev);
        assert_eq!(RunMode::default().to_string(), DEFAULT_RUN_MODE);

        store.apply_overrides([(KEY_APP_MODE, "prod")]);
        assert_eq!(RunMode::from_settings(&store), RunMode::Prod("prod".to_string()));
    }
}
