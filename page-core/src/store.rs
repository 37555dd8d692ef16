//! Page persistence.
//!
//! [`PageRepository`] is the boundary the editor publishes through.
//! [`PageStore`] is a thread-safe implementation shared by HTTP handlers,
//! with optional JSON-file persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::{PageDocument, PageError};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// The document failed validation.
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] PageError),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A page already exists under the slug.
    #[error("Slug already taken: {0}")]
    SlugTaken(String),
    /// The store cannot perform this operation in its configuration.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Where published pages go.
pub trait PageRepository: Send + Sync {
    /// Store `document` under `slug`, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the document could not be stored. A failed
    /// save leaves the previous version in place.
    fn save(&self, slug: &str, document: &PageDocument) -> Result<(), StoreError>;

    /// Fetch the document stored under `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if nothing is stored there.
    fn load(&self, slug: &str) -> Result<PageDocument, StoreError>;
}

/// A published page: the site name it was published under and its content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredPage {
    /// Site name given at publish time. Empty when saved without one.
    #[serde(default)]
    pub name: String,
    /// Page document.
    pub content: PageDocument,
}

/// Thread-safe page storage.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Arc<RwLock<HashMap<String, StoredPage>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl PageStore {
    /// Create an in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with filesystem persistence.
    ///
    /// Pages are saved as JSON files in `data_dir`. The directory is created
    /// if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            pages: Arc::default(),
            data_dir: Some(data_dir),
        })
    }

    /// The data directory, if persistence is enabled.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Whether a page is stored under `slug`.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        let in_memory = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(slug);
        in_memory || self.on_disk(slug)
    }

    fn on_disk(&self, slug: &str) -> bool {
        self.page_path(slug).is_some_and(|path| path.exists())
    }

    /// Publish a new page under `slug` with its site name.
    ///
    /// The existence check and the insert happen under one write lock, so
    /// two publishers racing for the same slug cannot overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlugTaken`] if `slug` is in use, or the write
    /// error if the page could not be persisted.
    pub fn insert_new(
        &self,
        slug: &str,
        name: &str,
        document: &PageDocument,
    ) -> Result<(), StoreError> {
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if pages.contains_key(slug) || self.on_disk(slug) {
            return Err(StoreError::SlugTaken(slug.to_string()));
        }
        let page = StoredPage {
            name: name.to_string(),
            content: document.clone(),
        };
        self.persist_page(slug, &page)?;
        pages.insert(slug.to_string(), page);
        tracing::debug!(slug, name, elements = document.elements.len(), "Page created");
        Ok(())
    }

    /// Fetch the page record, including its site name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if nothing is stored there.
    pub fn page(&self, slug: &str) -> Result<StoredPage, StoreError> {
        let cached = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(slug)
            .cloned();
        match cached {
            Some(page) => Ok(page),
            None if self.data_dir.is_some() => self.load_page_from_disk(slug),
            None => Err(StoreError::PageNotFound(slug.to_string())),
        }
    }

    /// Slugs currently held in memory.
    #[must_use]
    pub fn slugs(&self) -> Vec<String> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut slugs: Vec<_> = pages.keys().cloned().collect();
        slugs.sort();
        slugs
    }

    /// Remove a page from memory and disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if there was no such page.
    pub fn delete_page(&self, slug: &str) -> Result<(), StoreError> {
        let removed = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(slug)
            .is_some();
        let removed_file = match self.page_path(slug) {
            Some(path) if path.exists() => {
                std::fs::remove_file(&path)?;
                true
            }
            _ => false,
        };
        if removed || removed_file {
            tracing::debug!(slug, "Page deleted");
            Ok(())
        } else {
            Err(StoreError::PageNotFound(slug.to_string()))
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn page_path(&self, slug: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", sanitize_filename(slug))))
    }

    /// Write a page to disk. No-op without a data directory.
    fn persist_page(&self, slug: &str, page: &StoredPage) -> Result<(), StoreError> {
        let Some(path) = self.page_path(slug) else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(page)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| {
            tracing::warn!("Failed to persist page {slug} to {}: {e}", path.display());
            StoreError::Io(e)
        })
    }

    fn read_page_file(path: &Path) -> Result<StoredPage, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Load a single page from disk into memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] without a data directory,
    /// [`StoreError::PageNotFound`] if the file is missing, or an I/O or
    /// serialization error if it can't be read.
    pub fn load_page_from_disk(&self, slug: &str) -> Result<StoredPage, StoreError> {
        let path = self
            .page_path(slug)
            .ok_or_else(|| StoreError::Unavailable("No data directory configured".into()))?;
        if !path.exists() {
            return Err(StoreError::PageNotFound(slug.to_string()));
        }
        let page = Self::read_page_file(&path)?;
        self.pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(slug.to_string(), page.clone());
        Ok(page)
    }

    /// Discover and load all persisted pages from the data directory.
    ///
    /// Files that fail to parse are skipped with a warning. Returns the
    /// slugs that were loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data directory or it can't be read.
    pub fn load_all_pages(&self) -> Result<Vec<String>, StoreError> {
        let data_dir = self
            .data_dir
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("No data directory configured".into()))?;
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Self::read_page_file(&path) {
                Ok(page) => {
                    self.pages
                        .write()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .insert(slug.to_string(), page);
                    loaded.push(slug.to_string());
                }
                Err(e) => tracing::warn!("Skipping unreadable page {}: {e}", path.display()),
            }
        }
        loaded.sort();
        Ok(loaded)
    }
}

impl PageRepository for PageStore {
    /// Replaces the content and keeps the site name of an existing page.
    fn save(&self, slug: &str, document: &PageDocument) -> Result<(), StoreError> {
        // An unreadable previous version is overwritten without its name.
        let name = self.page(slug).map(|page| page.name).unwrap_or_default();
        let page = StoredPage {
            name,
            content: document.clone(),
        };
        self.persist_page(slug, &page)?;
        self.pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(slug.to_string(), page);
        tracing::debug!(slug, elements = document.elements.len(), "Page saved");
        Ok(())
    }

    fn load(&self, slug: &str) -> Result<PageDocument, StoreError> {
        self.page(slug).map(|page| page.content)
    }
}

/// Sanitize a slug for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(slug: &str) -> String {
    slug.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, Element, ElementKind, Placement};

    fn sample() -> PageDocument {
        let element = Element::create(ElementKind::Button, &Placement::default(), 0);
        PageDocument::from_document(&Document::from_elements(vec![element]).expect("doc"))
    }

    #[test]
    fn test_save_and_load() {
        let store = PageStore::new();
        let document = sample();
        store.save("shop-ab12", &document).expect("save");

        assert!(store.contains("shop-ab12"));
        assert_eq!(store.load("shop-ab12").expect("load"), document);
        assert_eq!(store.slugs(), vec!["shop-ab12".to_string()]);
    }

    #[test]
    fn test_load_missing_page() {
        let store = PageStore::new();
        assert!(matches!(
            store.load("nope"),
            Err(StoreError::PageNotFound(slug)) if slug == "nope"
        ));
    }

    #[test]
    fn test_save_replaces() {
        let store = PageStore::new();
        store.save("a", &sample()).expect("save");
        store.save("a", &PageDocument::default()).expect("save");
        assert!(store.load("a").expect("load").elements.is_empty());
    }

    #[test]
    fn test_delete_page() {
        let store = PageStore::new();
        store.save("a", &sample()).expect("save");
        store.delete_page("a").expect("delete");
        assert!(!store.contains("a"));
        assert!(matches!(
            store.delete_page("a"),
            Err(StoreError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("shop-ab12"), "shop-ab12");
        assert_eq!(sanitize_filename("../etc/passwd"), "___etc_passwd");
    }

    #[test]
    fn test_persistence_survives_new_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let document = sample();
        {
            let store = PageStore::with_data_dir(dir.path()).expect("store");
            store.save("landing-x1y2", &document).expect("save");
        }
        assert!(dir.path().join("landing-x1y2.json").exists());

        let store = PageStore::with_data_dir(dir.path()).expect("store");
        assert_eq!(store.load("landing-x1y2").expect("load"), document);

        let fresh = PageStore::with_data_dir(dir.path()).expect("store");
        assert_eq!(
            fresh.load_all_pages().expect("load all"),
            vec!["landing-x1y2".to_string()]
        );
        assert_eq!(fresh.slugs(), vec!["landing-x1y2".to_string()]);
    }

    #[test]
    fn test_load_all_skips_corrupt_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("broken.json"), "{ not json").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");
        let store = PageStore::with_data_dir(dir.path()).expect("store");
        store.save("good", &sample()).expect("save");

        let fresh = PageStore::with_data_dir(dir.path()).expect("store");
        assert_eq!(fresh.load_all_pages().expect("load"), vec!["good".to_string()]);
    }

    #[test]
    fn test_failed_write_keeps_previous_version() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PageStore::with_data_dir(dir.path().join("pages")).expect("store");
        store.save("a", &sample()).expect("save");

        std::fs::remove_dir_all(dir.path().join("pages")).expect("remove");
        let result = store.save("a", &PageDocument::default());
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.load("a").expect("load").elements.len(), 1);
    }

    #[test]
    fn test_insert_new_refuses_taken_slug() {
        let store = PageStore::new();
        store
            .insert_new("promo-ab12", "Promo", &sample())
            .expect("insert");
        assert!(matches!(
            store.insert_new("promo-ab12", "Other", &PageDocument::default()),
            Err(StoreError::SlugTaken(slug)) if slug == "promo-ab12"
        ));
        let page = store.page("promo-ab12").expect("page");
        assert_eq!(page.name, "Promo");
        assert_eq!(page.content, sample());
    }

    #[test]
    fn test_concurrent_insert_new_has_one_winner() {
        let store = PageStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .insert_new("race-0000", &format!("site {i}"), &PageDocument::default())
                        .is_ok()
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_save_keeps_site_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PageStore::with_data_dir(dir.path()).expect("store");
        store
            .insert_new("cafe-9z9z", "Café & Bar", &sample())
            .expect("insert");
        store
            .save("cafe-9z9z", &PageDocument::default())
            .expect("save");

        let fresh = PageStore::with_data_dir(dir.path()).expect("store");
        let page = fresh.page("cafe-9z9z").expect("page");
        assert_eq!(page.name, "Café & Bar");
        assert!(page.content.elements.is_empty());
    }

    #[test]
    fn test_insert_new_sees_pages_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        PageStore::with_data_dir(dir.path())
            .expect("store")
            .insert_new("a-0001", "A", &sample())
            .expect("insert");

        let fresh = PageStore::with_data_dir(dir.path()).expect("store");
        assert!(matches!(
            fresh.insert_new("a-0001", "B", &sample()),
            Err(StoreError::SlugTaken(_))
        ));
    }

    #[test]
    fn test_load_all_without_data_dir() {
        let store = PageStore::new();
        assert!(matches!(
            store.load_all_pages(),
            Err(StoreError::Unavailable(_))
        ));
    }
}
