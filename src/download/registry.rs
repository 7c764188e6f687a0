//! Registry of accepted links awaiting download.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use url::Url;

use crate::fs::{destination_file_name, OutputRoots};
use crate::media::classify::{is_image_extension, naming_extension, short_id};
use crate::media::MediaType;

/// Outcome of registering a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Link registered under this destination path.
    Added(PathBuf),
    /// A file already exists at the destination; nothing registered.
    AlreadyOnDisk(PathBuf),
    /// No destination path can be derived (unparseable URL or no extension).
    Unnameable,
}

/// Mapping of destination path to source URL.
///
/// Keyed by destination path, so two links resolving to the same path keep
/// only the last registered URL. Byte-identical content under different
/// paths is caught later by the dedup ledger.
#[derive(Debug)]
pub struct ContentRegistry {
    roots: OutputRoots,
    entries: Mutex<HashMap<PathBuf, String>>,
}

impl ContentRegistry {
    /// Create an empty registry writing under the given roots.
    pub fn new(roots: OutputRoots) -> Self {
        Self {
            roots,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Destination path for a link, or `None` if the link cannot be named.
    pub fn destination_path(&self, link: &str, user: &str, title: &str) -> Option<PathBuf> {
        let url = Url::parse(link).ok()?;
        let extension = naming_extension(&url);
        if extension.is_empty() {
            return None;
        }

        let media_type = MediaType::from_is_image(is_image_extension(&extension));
        let file_name = destination_file_name(user, &short_id(&url), title, &extension);

        Some(self.roots.root_for(media_type).join(file_name))
    }

    /// Register a link, reporting what happened.
    pub fn register(&self, link: &str, user: &str, title: &str) -> Registration {
        let path = match self.destination_path(link, user, title) {
            Some(path) => path,
            None => return Registration::Unnameable,
        };

        if path.exists() {
            return Registration::AlreadyOnDisk(path);
        }

        self.lock().insert(path.clone(), link.to_string());
        Registration::Added(path)
    }

    /// Register a link; `false` if it was skipped.
    pub fn try_add(&self, link: &str, user: &str, title: &str) -> bool {
        matches!(self.register(link, user, title), Registration::Added(_))
    }

    /// Remove and return up to `n` entries. Order is unspecified.
    pub fn drain_batch(&self, n: usize) -> HashMap<PathBuf, String> {
        let mut entries = self.lock();
        let keys: Vec<PathBuf> = entries.keys().take(n).cloned().collect();

        keys.into_iter()
            .filter_map(|key| entries.remove_entry(&key))
            .collect()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
