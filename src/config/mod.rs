/// Layered settings resolution.
///
/// Resolution order (later wins):
/// 1. Base properties source (`application.properties`), required
/// 2. Override files, in the order given
/// 3. Environment variables (`APPSETTINGS_MODE`)
/// 4. `key=value` assignments from the command line
///
/// Overrides may also be applied at runtime through
/// [`SettingsStore::apply_overrides`]; readers always see a complete
/// snapshot.
mod builder;
pub mod cli;
pub mod env;
pub mod global;
mod overrides;
mod properties;
mod store;
mod validation;

pub use builder::SettingsBuilder;
pub use cli::CliArgs;
pub use env::EnvSettings;
pub use overrides::{env_overrides, load_overrides, parse_assignment};
pub use properties::parse_properties;
pub use store::{SettingsSnapshot, SettingsStore};
pub use validation::validate_settings;

/// Conventional file name of the base source.
pub const BASE_SOURCE_NAME: &str = "application.properties";

/// Locale used when a request carries none.
pub const KEY_APP_LOCALE: &str = "application.locale";
/// Run mode: `dev` or anything else.
pub const KEY_APP_MODE: &str = "application.mode";
/// Server-side temp directory. Never exposed to clients.
pub const KEY_TEMP_DIR: &str = "temp.dir";
