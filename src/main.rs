use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use appsettings::config::{CliArgs, EnvSettings, SettingsBuilder, global};
use appsettings::{
    FsProbe, Identity, LocaleTag, RunMode, logging, resolve_for_request, runtime_paths,
    select_app_bundle, to_public_view,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    config_path: String,
    asset_root: String,
    run_mode: String,
    locale_script: String,
    app_bundle: &'static str,
    settings: appsettings::PublicSettingsView,
}

fn main() -> Result<()> {
    let env = EnvSettings::from_env();
    logging::init_logging(&env)?;

    let cli = CliArgs::parse();
    let config_path = runtime_paths::resolve_base_source(cli.config.as_deref(), &env)?;

    // No degraded mode: a base source that fails to load or validate stops here.
    let store = global::get_or_try_init(|| {
        SettingsBuilder::new(config_path.clone())
            .override_files(cli.overrides.iter().cloned())
            .env(env.clone())
            .assignments(cli.assignments.iter().cloned())
            .build()
    })
    .with_context(|| format!("failed to initialize settings from {}", config_path.display()))?;
    store.log_startup_summary();

    let asset_root = runtime_paths::resolve_asset_root(cli.asset_root.as_deref(), &env);
    let probe = FsProbe::new(&asset_root);

    let request_locale = match (&cli.locale, &cli.accept_language) {
        (Some(raw), _) => Some(LocaleTag::parse(raw).context("invalid --locale")?),
        (None, Some(header)) => LocaleTag::from_accept_language(header),
        (None, None) => None,
    };
    let locale_script = resolve_for_request(&store, request_locale.as_ref(), &probe)?;

    let run_mode = RunMode::from_settings(&store);
    let app_bundle = select_app_bundle(&run_mode, &probe);

    let identity = match (cli.user_name, cli.user_login) {
        (Some(name), Some(login)) => Some(Identity::new(name, login)),
        _ => None,
    };
    let settings = to_public_view(&store, &identity);

    let report = Report {
        config_path: config_path.display().to_string(),
        asset_root: probe.root().display().to_string(),
        run_mode: run_mode.to_string(),
        locale_script,
        app_bundle,
        settings,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize report")?
    );

    global::shutdown();
    Ok(())
}
