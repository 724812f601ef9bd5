use crate::error::{ConfigError, ConfigResult};
use crate::locale::LocaleTag;

use super::store::SettingsStore;
use super::{KEY_APP_LOCALE, KEY_APP_MODE};

/// Validate settings once the base source and overrides are in place.
///
/// Returns an error if:
/// - `application.locale` is missing or blank
/// - `application.locale` has no usable language code
///
/// An `application.mode` other than `dev`/`prod` is accepted (it selects
/// the optimized bundle) but logged.
pub fn validate_settings(store: &SettingsStore) -> ConfigResult<()> {
    let Some(locale) = store.non_blank(KEY_APP_LOCALE) else {
        return Err(ConfigError::Invalid(format!(
            "`{KEY_APP_LOCALE}` must be set; it is the locale used when a request has none"
        )));
    };
    LocaleTag::parse(&locale)
        .map_err(|err| ConfigError::Invalid(format!("`{KEY_APP_LOCALE}`: {err}")))?;

    if let Some(mode) = store.non_blank(KEY_APP_MODE) {
        if mode != "dev" && mode != "prod" {
            tracing::warn!(
                key = KEY_APP_MODE,
                value = %mode,
                "unrecognized run mode; treating as production"
            );
        }
    }

    Ok(())
}
