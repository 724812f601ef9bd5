//! Locale tags and localized script selection.
//!
//! A request's locale is matched against the translated scripts that are
//! actually deployed, falling back from `lang_REGION` to `lang` and finally
//! to [`DEFAULT_LANGUAGE`].

use std::fmt;

use crate::config::{KEY_APP_LOCALE, SettingsStore};
use crate::error::LocaleError;
use crate::probe::ResourceProbe;

/// Language returned when no translated script matches.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Directory holding translated scripts, one `<form>.js` per locale.
pub const I18N_SCRIPT_DIR: &str = "/js/i18n";

/// Language code plus optional region, e.g. `en` or `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    language: String,
    region: Option<String>,
}

impl LocaleTag {
    pub fn new(language: &str, region: Option<&str>) -> Result<Self, LocaleError> {
        let language = language.trim();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LocaleError::InvalidTag(language.to_string()));
        }
        let region = region
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| {
                if r.chars().all(|c| c.is_ascii_alphanumeric()) {
                    Ok(r.to_ascii_uppercase())
                } else {
                    Err(LocaleError::InvalidTag(r.to_string()))
                }
            })
            .transpose()?;
        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }

    /// Parse `lang`, `lang-REGION` or `lang_REGION`. Anything after the
    /// region (variants, scripts) is ignored.
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        let normalized = raw.trim().replace('-', "_");
        let mut parts = normalized.split('_');
        let language = parts.next().unwrap_or_default();
        if language.is_empty() {
            return Err(LocaleError::InvalidTag(raw.to_string()));
        }
        Self::new(language, parts.next()).map_err(|_| LocaleError::InvalidTag(raw.to_string()))
    }

    /// Pick the preferred locale from an `Accept-Language` header.
    ///
    /// Entries are ranked by `q` (default 1); equal weights keep header
    /// order. Wildcards, `q=0` and unparseable entries are skipped.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut ranked: Vec<(f32, Self)> = header
            .split(',')
            .filter_map(|entry| {
                let mut params = entry.split(';');
                let tag = params.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }
                let mut weight = 1.0_f32;
                for param in params {
                    if let Some(q) = param.trim().strip_prefix("q=") {
                        weight = q.trim().parse().ok()?;
                    }
                }
                if weight.is_nan() || weight <= 0.0 {
                    return None;
                }
                Some((weight, Self::parse(tag).ok()?))
            })
            .collect();
        // stable sort keeps header order for ties
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().next().map(|(_, tag)| tag)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// `lang_REGION`, or just `lang` without a region.
    pub fn long_form(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// `lang` alone.
    pub fn short_form(&self) -> &str {
        &self.language
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long_form())
    }
}

/// Resource path of the translated script for a locale form.
pub fn script_path(form: &str) -> String {
    format!("{I18N_SCRIPT_DIR}/{form}.js")
}

/// Pick the most specific translated script that exists.
///
/// `request` wins over `fallback` (the configured `application.locale`).
/// With neither, the configuration is broken and
/// [`LocaleError::MissingFallback`] is returned.
pub fn resolve_locale_script<P>(
    request: Option<&LocaleTag>,
    fallback: Option<&str>,
    probe: &P,
) -> Result<String, LocaleError>
where
    P: ResourceProbe + ?Sized,
{
    let parsed;
    let tag = match request {
        Some(tag) => tag,
        None => {
            let fallback = fallback.ok_or(LocaleError::MissingFallback)?;
            parsed = LocaleTag::parse(fallback)?;
            &parsed
        }
    };

    let long = tag.long_form();
    if probe.exists(&script_path(&long)) {
        return Ok(long);
    }
    let short = tag.short_form();
    if probe.exists(&script_path(short)) {
        return Ok(short.to_string());
    }
    tracing::debug!(locale = %tag, "no translated script; using default language");
    Ok(DEFAULT_LANGUAGE.to_string())
}

/// [`resolve_locale_script`] with the fallback read from `store`.
pub fn resolve_for_request<P>(
    store: &SettingsStore,
    request: Option<&LocaleTag>,
    probe: &P,
) -> Result<String, LocaleError>
where
    P: ResourceProbe + ?Sized,
{
    let fallback = store.non_blank(KEY_APP_LOCALE);
    resolve_locale_script(request, fallback.as_deref(), probe)
}
