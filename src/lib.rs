//! Application settings for a server-rendered web backend.
//!
//! - [`config`]: layered `key=value` settings with typed lookups and a
//!   process-wide handle
//! - [`locale`]: picks the most specific translated script that is deployed
//! - [`bundle`]: picks the minified or development application bundle
//! - [`public_view`]: client-safe settings payload with identity keys
pub mod bundle;
pub mod config;
pub mod error;
pub mod identity;
pub mod locale;
pub mod logging;
pub mod probe;
pub mod public_view;
pub mod runtime_paths;

pub use bundle::{RunMode, select_app_bundle};
pub use config::{SettingsBuilder, SettingsSnapshot, SettingsStore};
pub use error::{ConfigError, LocaleError};
pub use identity::{Anonymous, Identity, IdentityProvider};
pub use locale::{LocaleTag, resolve_for_request, resolve_locale_script};
pub use probe::{FsProbe, ResourceProbe, StaticProbe};
pub use public_view::{PublicSettingsView, to_public_view};
