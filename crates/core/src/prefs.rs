//! The per-user preference collaborator and the private-data assembly.
//!
//! Preferences live elsewhere; this layer consumes them through the
//! narrow [`PreferenceStore`] contract and shapes them into the records
//! the privatedata responses carry. [`MemoryPrefs`] is the in-process
//! implementation used by the binary and by tests.

use indexmap::IndexMap;

use crate::payload::{Field, Record};

/// Narrow contract over the external preference store.
///
/// An empty `app` or `key` argument at the assembly level means "all";
/// the store itself only ever sees concrete names.
pub trait PreferenceStore: Send + Sync {
    /// Apps the user has preferences for, in storage order.
    fn list_apps(&self, user: &str) -> Vec<String>;

    /// Keys the user has set for one app, in storage order.
    fn list_keys(&self, user: &str, app: &str) -> Vec<String>;

    /// One stored value, if set.
    fn get_value(&self, user: &str, app: &str, key: &str) -> Option<String>;
}

/// Assemble the "get private data" records for a user.
///
/// An empty `app` selects every app; an empty `key` selects every key of
/// each selected app. Each record is the ordered mapping
/// `{app, key, value}`; a missing value reads as the empty string.
pub fn private_data(
    store: &dyn PreferenceStore,
    user: &str,
    app: &str,
    key: &str,
) -> Vec<Record> {
    let apps = if app.is_empty() {
        store.list_apps(user)
    } else {
        vec![app.to_owned()]
    };

    let mut records = Vec::new();
    for app in &apps {
        let keys = if key.is_empty() {
            store.list_keys(user, app)
        } else {
            vec![key.to_owned()]
        };
        for key in &keys {
            let value = store.get_value(user, app, key).unwrap_or_default();
            let mut record = Record::new();
            record.insert("app".to_owned(), Field::from(app.as_str()));
            record.insert("key".to_owned(), Field::from(key.as_str()));
            record.insert("value".to_owned(), Field::from(value));
            records.push(record);
        }
    }
    records
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-process preference store: user -> app -> key -> value, all in
/// insertion order. Seed it with [`MemoryPrefs::set`] before sharing.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: IndexMap<String, IndexMap<String, IndexMap<String, String>>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one value, creating the user/app levels as needed.
    pub fn set(
        &mut self,
        user: impl Into<String>,
        app: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.values
            .entry(user.into())
            .or_default()
            .entry(app.into())
            .or_default()
            .insert(key.into(), value.into());
    }
}

impl PreferenceStore for MemoryPrefs {
    fn list_apps(&self, user: &str) -> Vec<String> {
        self.values
            .get(user)
            .map(|apps| apps.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn list_keys(&self, user: &str, app: &str) -> Vec<String> {
        self.values
            .get(user)
            .and_then(|apps| apps.get(app))
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn get_value(&self, user: &str, app: &str, key: &str) -> Option<String> {
        self.values.get(user)?.get(app)?.get(key).cloned()
    }
}
