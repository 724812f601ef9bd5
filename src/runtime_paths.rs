use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::BASE_SOURCE_NAME;
use crate::config::env::{ENV_CONFIG, EnvSettings};

/// Returns the install prefix for packaged layouts, e.g. `/usr`
/// from an executable path like `/usr/bin/appsettings`.
fn install_prefix_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let bin_dir = exe.parent()?;
    if bin_dir.file_name()?.to_str()? != "bin" {
        return None;
    }
    Some(bin_dir.parent()?.to_path_buf())
}

/// Resolve the base configuration source.
///
/// Resolution order:
/// 1. Explicit path (`--config`)
/// 2. `APPSETTINGS_CONFIG` environment variable
/// 3. `./application.properties`
/// 4. Packaged layout (`<prefix>/share/<pkg>/application.properties`)
/// 5. Source-tree fallback via `CARGO_MANIFEST_DIR` (dev mode)
///
/// Explicit locations are returned even when missing so that loading
/// reports the real path; only the implicit probes are skipped over.
pub fn resolve_base_source(explicit: Option<&Path>, env: &EnvSettings) -> Result<PathBuf> {
    // 1. CLI
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    // 2. Explicit env override
    if let Some(path) = &env.config {
        return Ok(path.clone());
    }

    // 3. Working directory
    let cwd = PathBuf::from(BASE_SOURCE_NAME);
    if cwd.is_file() {
        return Ok(cwd);
    }

    // 4. Packaged layout
    if let Some(prefix) = install_prefix_dir() {
        let packaged = prefix
            .join("share")
            .join(env!("CARGO_PKG_NAME"))
            .join(BASE_SOURCE_NAME);
        if packaged.is_file() {
            return Ok(packaged);
        }
    }

    // 5. Dev fallback: source tree
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(BASE_SOURCE_NAME);
    if dev_path.is_file() {
        return Ok(dev_path);
    }

    bail!(
        "unable to locate application configuration file. \
         pass --config or set {ENV_CONFIG}"
    )
}

/// Root of the static asset tree: explicit path, `APPSETTINGS_ASSET_ROOT`,
/// then the working directory.
pub fn resolve_asset_root(explicit: Option<&Path>, env: &EnvSettings) -> PathBuf {
    explicit
        .or(env.asset_root.as_deref())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory for rolling log files.
pub fn resolve_log_dir(env: &EnvSettings) -> PathBuf {
    if let Some(dir) = &env.log_dir {
        return dir.clone();
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
        .join("logs")
}
