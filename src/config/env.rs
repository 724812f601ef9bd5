//! `APPSETTINGS_*` environment variables, read once at startup.

use std::path::PathBuf;

pub const ENV_CONFIG: &str = "APPSETTINGS_CONFIG";
pub const ENV_ASSET_ROOT: &str = "APPSETTINGS_ASSET_ROOT";
pub const ENV_LOG_DIR: &str = "APPSETTINGS_LOG_DIR";
pub const ENV_LOG_PROFILE: &str = "APPSETTINGS_LOG_PROFILE";
pub const ENV_LOG: &str = "APPSETTINGS_LOG";
pub const ENV_LOG_ANSI: &str = "APPSETTINGS_LOG_ANSI";
/// Overrides `application.mode`.
pub const ENV_MODE: &str = "APPSETTINGS_MODE";

/// Environment as seen by the loader, the path resolvers and logging.
///
/// Blank variables count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub config: Option<PathBuf>,
    pub asset_root: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_profile: Option<String>,
    /// `RUST_LOG`, else `APPSETTINGS_LOG`.
    pub log_filter: Option<String>,
    pub log_ansi: Option<bool>,
    pub mode: Option<String>,
}

impl EnvSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            config: text(ENV_CONFIG).map(PathBuf::from),
            asset_root: text(ENV_ASSET_ROOT).map(PathBuf::from),
            log_dir: text(ENV_LOG_DIR).map(PathBuf::from),
            log_profile: text(ENV_LOG_PROFILE),
            log_filter: text("RUST_LOG").or_else(|| text(ENV_LOG)),
            log_ansi: text(ENV_LOG_ANSI).map(|raw| is_truthy(&raw)),
            mode: text(ENV_MODE),
        }
    }
}

/// 1/true/yes/on, case-insensitive.
fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
