use clap::Parser;
use std::path::PathBuf;

/// appsettings — resolve application settings, locale scripts and bundles.
#[derive(Debug, Parser)]
#[command(name = "appsettings", about)]
pub struct CliArgs {
    /// Path to the base configuration file (application.properties).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additional properties file merged over the base configuration.
    /// May be given multiple times; later files win.
    #[arg(long = "override", value_name = "PATH")]
    pub overrides: Vec<PathBuf>,

    /// Single `key=value` override, applied after override files.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Root of the deployed static asset tree used for existence checks.
    #[arg(long = "asset-root")]
    pub asset_root: Option<PathBuf>,

    /// Request locale (e.g. `en_US` or `fr-CA`).
    #[arg(long, conflicts_with = "accept_language")]
    pub locale: Option<String>,

    /// Raw `Accept-Language` header to derive the request locale from.
    #[arg(long = "accept-language")]
    pub accept_language: Option<String>,

    /// Display name of the current user, included in the public settings.
    #[arg(long = "user-name", requires = "user_login")]
    pub user_name: Option<String>,

    /// Login of the current user, included in the public settings.
    #[arg(long = "user-login", requires = "user_name")]
    pub user_login: Option<String>,
}
