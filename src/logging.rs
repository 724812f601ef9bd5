use anyhow::{Context, Result};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::env::EnvSettings;
use crate::runtime_paths;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogProfile {
    Dev,
    User,
    All,
}

pub fn init_logging(env: &EnvSettings) -> Result<()> {
    let profile = resolve_profile(env.log_profile.as_deref());
    let filter_spec = resolve_filter_spec(profile, env.log_filter.as_deref());
    let log_dir = runtime_paths::resolve_log_dir(env);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "appsettings.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    FILE_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("logging guard was already initialized"))?;

    // If another logger has already been installed, keep going; tracing still works.
    let _ = tracing_log::LogTracer::init();

    let env_filter = EnvFilter::try_new(filter_spec.clone())
        .with_context(|| format!("invalid log filter: {filter_spec}"))?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(env.log_ansi.unwrap_or(true))
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        );
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize tracing subscriber")?;

    tracing::info!(
        profile = ?profile,
        filter = %filter_spec,
        log_dir = %log_dir.display(),
        "logging initialized"
    );
    Ok(())
}

fn resolve_profile(requested: Option<&str>) -> LogProfile {
    if let Some(raw) = requested {
        match raw.to_ascii_lowercase().as_str() {
            "dev" => return LogProfile::Dev,
            "user" => return LogProfile::User,
            "all" => return LogProfile::All,
            _ => {}
        }
    }

    if cfg!(debug_assertions) || std::env::var_os("CARGO").is_some() {
        LogProfile::Dev
    } else {
        LogProfile::User
    }
}

/// An explicit filter (`RUST_LOG` or `APPSETTINGS_LOG`) beats the profile.
fn resolve_filter_spec(profile: LogProfile, explicit: Option<&str>) -> String {
    if let Some(spec) = explicit {
        return spec.to_string();
    }
    match profile {
        LogProfile::Dev => "off,appsettings=trace".to_string(),
        LogProfile::User => "info".to_string(),
        LogProfile::All => "trace".to_string(),
    }
}
