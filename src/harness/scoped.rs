//! Scoped overrides of test-wide settings.
//!
//! An override captures a setting's current value, applies a temporary one,
//! and puts the captured value back exactly once when the scope ends,
//! whether the scope returned normally, returned an error, or panicked.
//!
//! Overrides mutate a shared store without locking. Tests that use them on
//! the same key must run serially.

use std::error::Error as StdError;
use std::fmt;

use super::settings::{SettingsStore, StoreError};

/// Setting key holding the language level of the language under test.
pub const LANGUAGE_LEVEL_KEY: &str = "languageLevel";

/// Errors from [`with_setting_override`].
#[derive(Debug, thiserror::Error)]
pub enum OverrideError<E: StdError + 'static> {
    /// The temporary value could not be applied. The body did not run and
    /// the setting is unchanged.
    #[error("failed to apply override for setting '{key}'")]
    Apply {
        /// The overridden setting.
        key: String,
        /// The store failure.
        #[source]
        source: StoreError,
    },

    /// The body failed. The original value was restored.
    #[error(transparent)]
    Body(E),

    /// The original value could not be restored.
    ///
    /// When the body also failed its error is kept in `body`.
    #[error("failed to restore setting '{key}' after override{}", body_suffix(.body.as_ref()))]
    Restore {
        /// The overridden setting.
        key: String,
        /// The store failure raised while restoring.
        #[source]
        source: StoreError,
        /// The body's error, if it failed too.
        body: Option<E>,
    },
}

impl<E: StdError + 'static> OverrideError<E> {
    /// Returns the body's error, if the body failed.
    #[must_use]
    pub const fn body_error(&self) -> Option<&E> {
        match self {
            Self::Body(error) => Some(error),
            Self::Restore { body, .. } => body.as_ref(),
            Self::Apply { .. } => None,
        }
    }
}

fn body_suffix<E: fmt::Display>(body: Option<&E>) -> String {
    body.map_or_else(String::new, |error| format!(" (body also failed: {error})"))
}

/// An applied override that restores the captured value when dropped.
///
/// Prefer [`SettingOverride::restore`] on the normal path so restoration
/// failures are reported. A failure during drop can only be logged.
pub struct SettingOverride<'a, S: SettingsStore + ?Sized> {
    store: &'a mut S,
    key: String,
    previous: Option<String>,
    restored: bool,
}

impl<'a, S: SettingsStore + ?Sized> SettingOverride<'a, S> {
    /// Captures the current value of `key` and sets it to `value`.
    ///
    /// # Errors
    ///
    /// Returns the store's error when `value` cannot be applied. Nothing is
    /// restored in that case because nothing changed.
    pub fn apply(store: &'a mut S, key: &str, value: &str) -> Result<Self, StoreError> {
        let previous = store.get(key);
        store.set(key, Some(value.to_owned()))?;
        tracing::debug!(
            key,
            value,
            previous = previous.as_deref().unwrap_or("<unset>"),
            "applied setting override"
        );
        Ok(Self {
            store,
            key: key.to_owned(),
            previous,
            restored: false,
        })
    }

    /// Returns the store with the override in effect.
    #[must_use]
    pub const fn store(&self) -> &S {
        &*self.store
    }

    /// Returns the captured value, or `None` if the setting was unset.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Restores the captured value now.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the captured value cannot be written
    /// back. The restoration is not retried on drop.
    pub fn restore(mut self) -> Result<(), StoreError> {
        self.restore_once()
    }

    fn restore_once(&mut self) -> Result<(), StoreError> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let previous = self.previous.take();
        tracing::debug!(
            key = %self.key,
            value = previous.as_deref().unwrap_or("<unset>"),
            "restoring setting"
        );
        self.store.set(&self.key, previous)
    }
}

impl<S: SettingsStore + ?Sized> Drop for SettingOverride<'_, S> {
    fn drop(&mut self) {
        if let Err(error) = self.restore_once() {
            tracing::error!(key = %self.key, %error, "failed to restore setting on drop");
        }
    }
}

impl<S: SettingsStore + ?Sized> fmt::Debug for SettingOverride<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingOverride")
            .field("key", &self.key)
            .field("previous", &self.previous)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}

/// Runs `body` with `key` temporarily set to `value`.
///
/// The body receives the store with the override in effect. The captured
/// value is restored exactly once afterwards, including when the body
/// panics.
///
/// # Errors
///
/// - [`OverrideError::Apply`] when the temporary value cannot be set; the
///   body does not run.
/// - [`OverrideError::Body`] when the body fails and restoration succeeds.
/// - [`OverrideError::Restore`] when restoration fails, carrying the
///   body's error as well if there was one.
///
/// # Examples
///
///     use goldenfix::harness::{MemorySettingsStore, SettingsStore, with_setting_override};
///
///     let mut store = MemorySettingsStore::new().with("languageLevel", "CF9");
///     let seen = with_setting_override(&mut store, "languageLevel", "CF11", |store| {
///         Ok::<_, std::io::Error>(store.get("languageLevel"))
///     })
///     .unwrap();
///     assert_eq!(seen.as_deref(), Some("CF11"));
///     assert_eq!(store.get("languageLevel").as_deref(), Some("CF9"));
pub fn with_setting_override<S, T, E, F>(
    store: &mut S,
    key: &str,
    value: &str,
    body: F,
) -> Result<T, OverrideError<E>>
where
    S: SettingsStore + ?Sized,
    E: StdError + 'static,
    F: FnOnce(&S) -> Result<T, E>,
{
    let guard = match SettingOverride::apply(store, key, value) {
        Ok(guard) => guard,
        Err(source) => {
            return Err(OverrideError::Apply {
                key: key.to_owned(),
                source,
            });
        }
    };
    let outcome = body(guard.store());
    match (outcome, guard.restore()) {
        (Ok(result), Ok(())) => Ok(result),
        (Err(error), Ok(())) => Err(OverrideError::Body(error)),
        (outcome, Err(source)) => {
            tracing::error!(key, %source, "failed to restore setting after override");
            Err(OverrideError::Restore {
                key: key.to_owned(),
                source,
                body: outcome.err(),
            })
        }
    }
}

/// Runs `body` with the language level temporarily set to `level`.
///
/// # Errors
///
/// See [`with_setting_override`].
pub fn with_language_level<S, T, E, F>(
    store: &mut S,
    level: &str,
    body: F,
) -> Result<T, OverrideError<E>>
where
    S: SettingsStore + ?Sized,
    E: StdError + 'static,
    F: FnOnce(&S) -> Result<T, E>,
{
    with_setting_override(store, LANGUAGE_LEVEL_KEY, level, body)
}

#[cfg(test)]
#[path = "scoped_tests.rs"]
mod tests;
