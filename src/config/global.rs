//! Process-wide settings handle.
//!
//! The store is created at most once per `initialize`/`shutdown` cycle, even
//! when many threads race on first access.

use arc_swap::ArcSwapOption;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use super::store::SettingsStore;

static STORE: ArcSwapOption<SettingsStore> = ArcSwapOption::const_empty();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Return the process-wide store, running `load` if none exists yet.
///
/// `load` runs at most once even under concurrent first access; callers that
/// lose the race get the winner's store. A failed `load` leaves the handle
/// empty and returns the error.
pub fn get_or_try_init<F, E>(load: F) -> Result<Arc<SettingsStore>, E>
where
    F: FnOnce() -> Result<SettingsStore, E>,
{
    if let Some(store) = STORE.load_full() {
        return Ok(store);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(store) = STORE.load_full() {
        return Ok(store);
    }
    let store = Arc::new(load()?);
    STORE.store(Some(Arc::clone(&store)));
    tracing::debug!("settings store initialized");
    Ok(store)
}

/// Install `store` as the process-wide store.
///
/// Returns the already installed store instead if one exists.
pub fn initialize(store: SettingsStore) -> Arc<SettingsStore> {
    match get_or_try_init(|| Ok::<_, Infallible>(store)) {
        Ok(installed) => installed,
        Err(never) => match never {},
    }
}

/// The process-wide store, if initialized.
pub fn current() -> Option<Arc<SettingsStore>> {
    STORE.load_full()
}

/// Drop the process-wide store. Readers holding an `Arc` keep their copy.
pub fn shutdown() -> Option<Arc<SettingsStore>> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    STORE.swap(None)
}
