//! The configuration store collaborator used by scoped overrides.
//!
//! Settings are string key/value pairs. The harness only needs to read a
//! value and to replace or clear it; persistence is the store's business.

use indexmap::IndexMap;

/// Errors reported by a [`SettingsStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The setting cannot be changed.
    #[error("setting '{key}' is read-only")]
    ReadOnly {
        /// The setting that was written.
        key: String,
    },

    /// The store accepted the value but could not persist it.
    #[error("failed to persist setting '{key}': {reason}")]
    Persist {
        /// The setting that was written.
        key: String,
        /// A human-readable explanation of the failure.
        reason: String,
    },
}

/// Key/value configuration read and written by scoped overrides.
pub trait SettingsStore {
    /// Returns the current value of `key`, or `None` if it is unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value of `key`. `None` clears it.
    ///
    /// A failed write must leave the stored value unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the value cannot be changed.
    fn set(&mut self, key: &str, value: Option<String>) -> Result<(), StoreError>;
}

/// Insertion-ordered in-memory settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettingsStore {
    values: IndexMap<String, String>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the store.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Iterates over settings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Option<String>) -> Result<(), StoreError> {
        match value {
            Some(value) => {
                self.values.insert(key.to_owned(), value);
            }
            None => {
                self.values.shift_remove(key);
            }
        }
        Ok(())
    }
}
