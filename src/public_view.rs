//! Client-safe settings payload.
//!
//! The full settings snapshot is merged with the caller's identity and
//! stripped of server-only keys before it is handed to the browser.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{KEY_TEMP_DIR, SettingsStore};
use crate::identity::IdentityProvider;

/// Keys that never leave the server.
pub const SERVER_ONLY_KEYS: &[&str] = &[KEY_TEMP_DIR];

pub const KEY_USER_NAME: &str = "user.name";
pub const KEY_USER_LOGIN: &str = "user.login";

/// JSON text emitted when serialization fails.
pub const EMPTY_OBJECT: &str = "{}";

/// Settings as exposed to clients: flat string map, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PublicSettingsView {
    entries: BTreeMap<String, String>,
}

impl PublicSettingsView {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as a JSON object; `{}` if serialization fails.
    pub fn to_json(&self) -> String {
        to_json_or_empty(self)
    }
}

/// Build the public view of `store` for the current caller.
///
/// Identity keys go in first and are then overwritten by any settings with
/// the same name; server-only keys are dropped last, whatever their origin.
pub fn to_public_view<I>(store: &SettingsStore, identity: &I) -> PublicSettingsView
where
    I: IdentityProvider + ?Sized,
{
    let mut entries = BTreeMap::new();

    match identity.current_identity() {
        Some(user) => {
            entries.insert(KEY_USER_NAME.to_string(), user.display_name);
            entries.insert(KEY_USER_LOGIN.to_string(), user.login_id);
        }
        None => tracing::debug!("no identity available; public settings without user keys"),
    }

    let snapshot = store.snapshot_all();
    entries.extend(snapshot.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    for key in SERVER_ONLY_KEYS {
        entries.remove(*key);
    }

    PublicSettingsView { entries }
}

/// Serialize `value` as JSON, falling back to `{}` on any failure.
pub fn to_json_or_empty<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize public settings");
            EMPTY_OBJECT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Anonymous, Identity};
    use serde::Serializer;
    use serde_json::Value;

    fn store() -> SettingsStore {
        "application.locale=en\napplication.mode=prod\ntemp.dir=/tmp/app\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn server_only_keys_are_removed() {
        let s = store();
        let view = to_public_view(&s, &Anonymous);
        assert!(!view.contains_key(KEY_TEMP_DIR));
        assert_eq!(view.get("application.mode"), Some("prod"));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn server_only_keys_removed_even_from_overrides() {
        let s: SettingsStore = "application.locale=en\n".parse().unwrap();
        s.apply_overrides([(KEY_TEMP_DIR, "/var/tmp")]);
        let view = to_public_view(&s, &Identity::new("Admin", "admin"));
        assert!(!view.contains_key(KEY_TEMP_DIR));
        assert!(!view.to_json().contains("/var/tmp"));
    }

    #[test]
    fn identity_keys_added_when_available() {
        let view = to_public_view(&store(), &Identity::new("Jane Doe", "jdoe"));
        assert_eq!(view.get(KEY_USER_NAME), Some("Jane Doe"));
        assert_eq!(view.get(KEY_USER_LOGIN), Some("jdoe"));

        let view = to_public_view(&store(), &None::<Identity>);
        assert!(!view.contains_key(KEY_USER_NAME));
        assert!(!view.contains_key(KEY_USER_LOGIN));
    }

    #[test]
    fn settings_win_over_identity_keys() {
        let s = store();
        s.apply_overrides([(KEY_USER_NAME, "configured")]);
        let view = to_public_view(&s, &Identity::new("Jane Doe", "jdoe"));
        assert_eq!(view.get(KEY_USER_NAME), Some("configured"));
        assert_eq!(view.get(KEY_USER_LOGIN), Some("jdoe"));
    }

    #[test]
    fn json_is_flat_string_object() {
        let view = to_public_view(&store(), &Identity::new("Jane", "jane"));
        let parsed: Value = serde_json::from_str(&view.to_json()).unwrap();
        let obj = parsed.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(obj.values().all(Value::is_string));
        assert_eq!(obj["user.login"], "jane");
        assert!(obj.get("temp.dir").is_none());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("boom"))
        }
    }

    #[test]
    fn serialization_failure_yields_empty_object() {
        assert_eq!(to_json_or_empty(&Unserializable), "{}");
    }

    #[test]
    fn empty_view_serializes_to_empty_object() {
        assert_eq!(PublicSettingsView::default().to_json(), EMPTY_OBJECT);
    }
}
