//! Fixture stores: where fixture text comes from and where golden updates go.
//!
//! The golden harness never touches the file system directly. It resolves,
//! loads and writes fixtures through a [`FixtureStore`], so code built on
//! the harness can be exercised against [`MemoryFixtureStore`] without any
//! files on disk.

use std::cell::RefCell;
use std::io;

use camino::Utf8PathBuf;
use indexmap::IndexMap;

use super::error::HarnessError;
use super::fixture::{FixtureId, FixtureKind, FixtureLayout};
use super::loader::{load_fixture_text, normalize_line_separators, write_fixture_text};

/// Resolves, loads and writes fixtures by logical identity.
pub trait FixtureStore {
    /// Resolves the path of one half of a fixture pair.
    fn resolve(&self, id: &FixtureId, kind: FixtureKind) -> Utf8PathBuf;

    /// Loads fixture text with normalized line separators.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureNotFound`] carrying the resolved path
    /// when the fixture is missing or unreadable.
    fn load(&self, id: &FixtureId, kind: FixtureKind) -> Result<String, HarnessError>;

    /// Replaces the fixture's contents with `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::FixtureWrite`] when the fixture cannot be
    /// written.
    fn write(&self, id: &FixtureId, kind: FixtureKind, contents: &str)
    -> Result<(), HarnessError>;
}

impl<S: FixtureStore + ?Sized> FixtureStore for &S {
    fn resolve(&self, id: &FixtureId, kind: FixtureKind) -> Utf8PathBuf {
        (**self).resolve(id, kind)
    }

    fn load(&self, id: &FixtureId, kind: FixtureKind) -> Result<String, HarnessError> {
        (**self).load(id, kind)
    }

    fn write(
        &self,
        id: &FixtureId,
        kind: FixtureKind,
        contents: &str,
    ) -> Result<(), HarnessError> {
        (**self).write(id, kind, contents)
    }
}

/// Fixture store backed by a directory tree on disk.
#[derive(Debug, Clone)]
pub struct DirFixtureStore {
    layout: FixtureLayout,
}

impl DirFixtureStore {
    /// Creates a store that resolves fixtures with `layout`.
    #[must_use]
    pub const fn new(layout: FixtureLayout) -> Self {
        Self { layout }
    }

    /// Returns the layout used for resolution.
    #[must_use]
    pub const fn layout(&self) -> &FixtureLayout {
        &self.layout
    }
}

impl FixtureStore for DirFixtureStore {
    fn resolve(&self, id: &FixtureId, kind: FixtureKind) -> Utf8PathBuf {
        self.layout.resolve(id, kind)
    }

    fn load(&self, id: &FixtureId, kind: FixtureKind) -> Result<String, HarnessError> {
        load_fixture_text(&self.resolve(id, kind))
    }

    fn write(
        &self,
        id: &FixtureId,
        kind: FixtureKind,
        contents: &str,
    ) -> Result<(), HarnessError> {
        write_fixture_text(&self.resolve(id, kind), contents)
    }
}

/// In-memory fixture store keyed by resolved path.
///
/// Writes are recorded in place and can be inspected with
/// [`MemoryFixtureStore::get`].
#[derive(Debug)]
pub struct MemoryFixtureStore {
    layout: FixtureLayout,
    files: RefCell<IndexMap<Utf8PathBuf, String>>,
}

impl MemoryFixtureStore {
    /// Creates an empty store that resolves fixtures with `layout`.
    #[must_use]
    pub fn new(layout: FixtureLayout) -> Self {
        Self {
            layout,
            files: RefCell::new(IndexMap::new()),
        }
    }

    /// Adds or replaces a fixture, returning the store.
    #[must_use]
    pub fn with_fixture(self, id: &FixtureId, kind: FixtureKind, text: &str) -> Self {
        let path = self.layout.resolve(id, kind);
        self.files.borrow_mut().insert(path, text.to_owned());
        self
    }

    /// Returns the raw stored text of a fixture, if present.
    #[must_use]
    pub fn get(&self, id: &FixtureId, kind: FixtureKind) -> Option<String> {
        self.files.borrow().get(&self.resolve(id, kind)).cloned()
    }

    /// Returns the number of stored fixture files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    /// Returns `true` if the store holds no fixtures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl FixtureStore for MemoryFixtureStore {
    fn resolve(&self, id: &FixtureId, kind: FixtureKind) -> Utf8PathBuf {
        self.layout.resolve(id, kind)
    }

    fn load(&self, id: &FixtureId, kind: FixtureKind) -> Result<String, HarnessError> {
        let path = self.resolve(id, kind);
        let files = self.files.borrow();
        let Some(text) = files.get(&path) else {
            return Err(HarnessError::FixtureNotFound {
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "no such in-memory fixture"),
            });
        };
        Ok(normalize_line_separators(text))
    }

    fn write(
        &self,
        id: &FixtureId,
        kind: FixtureKind,
        contents: &str,
    ) -> Result<(), HarnessError> {
        let path = self.resolve(id, kind);
        self.files.borrow_mut().insert(path, contents.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simpleif() -> FixtureId {
        FixtureId::new("data/parser", "simpleif")
    }

    #[test]
    fn memory_store_loads_normalized_text() {
        let store = MemoryFixtureStore::new(FixtureLayout::new("/root"))
            .with_fixture(&simpleif(), FixtureKind::Input, "a\r\nb\r\n");
        assert_eq!(
            store.load(&simpleif(), FixtureKind::Input).ok(),
            Some("a\nb\n".to_owned())
        );
    }

    #[test]
    fn memory_store_missing_fixture_carries_resolved_path() {
        let store = MemoryFixtureStore::new(FixtureLayout::new("/root"));
        let Err(error) = store.load(&simpleif(), FixtureKind::Expected) else {
            panic!("empty store should not load anything");
        };
        assert!(matches!(error, HarnessError::FixtureNotFound { .. }));
        assert_eq!(
            error.path().map(|path| path.as_str()),
            Some("/root/data/parser/simpleif.test.expected")
        );
    }

    #[test]
    fn memory_store_records_writes() {
        let store = MemoryFixtureStore::new(FixtureLayout::new("/root"));
        assert!(store.is_empty());

        store
            .write(&simpleif(), FixtureKind::Expected, "CfmlFile\n")
            .expect("in-memory writes succeed");

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&simpleif(), FixtureKind::Expected),
            Some("CfmlFile\n".to_owned())
        );
        assert_eq!(store.get(&simpleif(), FixtureKind::Input), None);
    }

    #[test]
    fn dir_store_resolves_through_its_layout() {
        let store = DirFixtureStore::new(FixtureLayout::new("/opt/plugin"));
        assert_eq!(
            store.resolve(&simpleif(), FixtureKind::Input),
            "/opt/plugin/data/parser/simpleif.test.cfml"
        );
        assert_eq!(store.layout().root().as_str(), "/opt/plugin");
    }
}
