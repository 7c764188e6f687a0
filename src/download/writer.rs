//! Fetch-dedup-write of a single registry entry.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::dedup::DedupLedger;
use crate::download::fetcher::Fetcher;
use crate::error::{Error, Result};
use crate::fs::temp_file_name;

/// What happened to one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// File written.
    Saved,
    /// Identical bytes were already written under another path.
    Duplicate,
    /// The fetch gave up or returned nothing.
    FetchFailed,
    /// The file could not be persisted.
    WriteFailed,
    /// Processing the entry panicked.
    Panicked,
}

impl SaveOutcome {
    /// Whether a file was written.
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Persists registry entries. Cheap to clone; clones share the fetcher and ledger.
#[derive(Clone)]
pub struct FileWriter {
    fetcher: Arc<dyn Fetcher>,
    ledger: Arc<DedupLedger>,
    show_skipped: bool,
}

impl FileWriter {
    /// Create a writer.
    pub fn new(fetcher: Arc<dyn Fetcher>, ledger: Arc<DedupLedger>) -> Self {
        Self {
            fetcher,
            ledger,
            show_skipped: true,
        }
    }

    /// Log duplicate skips at info level (`true`) or debug level (`false`).
    pub fn with_show_skipped(mut self, show_skipped: bool) -> Self {
        self.show_skipped = show_skipped;
        self
    }

    /// Ledger shared by this writer.
    pub fn ledger(&self) -> &Arc<DedupLedger> {
        &self.ledger
    }

    /// Fetch `url` and write it to `path` unless its content was already written.
    ///
    /// Failures stay local to this entry: they are logged and reported in the
    /// outcome, never returned.
    pub async fn save_one(&self, worker: usize, path: &Path, url: &str) -> SaveOutcome {
        let content = match self.fetch_content(url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "W-{}: Failed to download {} -> {}: {}",
                    worker,
                    url,
                    path.display(),
                    e
                );
                return SaveOutcome::FetchFailed;
            }
        };

        if self.ledger.check_and_record(&content) {
            if self.show_skipped {
                tracing::info!(
                    "W-{}: Skipping duplicate file by content: {} ({})",
                    worker,
                    path.display(),
                    url
                );
            } else {
                tracing::debug!(
                    "W-{}: Skipping duplicate file by content: {} ({})",
                    worker,
                    path.display(),
                    url
                );
            }
            return SaveOutcome::Duplicate;
        }

        match write_atomic(path, &content).await {
            Ok(()) => {
                tracing::info!(
                    "W-{}: Downloaded file: {}",
                    worker,
                    path.file_name()
                        .map(|n| n.to_string_lossy())
                        .unwrap_or_default()
                );
                SaveOutcome::Saved
            }
            Err(e) => {
                self.ledger.forget(&content);
                tracing::error!(
                    "W-{}: Error writing file {} ({}): {}",
                    worker,
                    path.display(),
                    url,
                    e
                );
                SaveOutcome::WriteFailed
            }
        }
    }

    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
        let content = self.fetcher.fetch(url).await?;
        if content.is_empty() {
            return Err(Error::EmptyContent(url.to_string()));
        }
        Ok(content)
    }
}

/// Write `content` to `path` so the file is either absent or complete.
///
/// Bytes are staged in a hidden temp file in the same directory, synced, then
/// linked into place. An existing `path` is never replaced.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(temp_file_name(path));

    let result = stage_and_publish(&temp_path, path, content).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

async fn stage_and_publish(temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)
        .await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);

    // A hard link never replaces an existing path.
    match fs::hard_link(temp_path, path).await {
        Ok(()) => {
            if let Err(e) = fs::remove_file(temp_path).await {
                tracing::warn!("Could not remove {}: {}", temp_path.display(), e);
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(Error::DestinationExists(path.display().to_string()))
        }
        Err(e) => {
            // Filesystems without hard links
            tracing::debug!("Hard link to {} failed ({}), renaming", path.display(), e);
            if fs::try_exists(path).await? {
                return Err(Error::DestinationExists(path.display().to_string()));
            }
            fs::rename(temp_path, path).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Serves fixed bodies; unknown URLs fail like an exhausted fetch.
    struct StaticFetcher(HashMap<String, Vec<u8>>);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.0.get(url).cloned().ok_or_else(|| Error::Network {
                url: url.to_string(),
                attempts: 5,
            })
        }
    }

    fn writer(bodies: &[(&str, &str)]) -> FileWriter {
        let map = bodies
            .iter()
            .map(|(url, body)| (url.to_string(), body.as_bytes().to_vec()))
            .collect();
        FileWriter::new(Arc::new(StaticFetcher(map)), Arc::new(DedupLedger::new()))
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("u__a__t.jpg");
        let writer = writer(&[("http://x/a.jpg", "AAAA")]);

        let outcome = writer.save_one(0, &path, "http://x/a.jpg").await;

        assert_eq!(outcome, SaveOutcome::Saved);
        assert!(outcome.is_success());
        assert_eq!(std::fs::read(&path).unwrap(), b"AAAA");
        assert_eq!(dir_entries(tmp.path()), vec!["u__a__t.jpg"]);
    }

    #[tokio::test]
    async fn test_duplicate_content_is_not_written() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = writer(&[("http://x/a.jpg", "SAME"), ("http://x/b.jpg", "SAME")]);

        let first = writer
            .save_one(0, &tmp.path().join("a.jpg"), "http://x/a.jpg")
            .await;
        let second = writer
            .save_one(1, &tmp.path().join("b.jpg"), "http://x/b.jpg")
            .await;

        assert_eq!(first, SaveOutcome::Saved);
        assert_eq!(second, SaveOutcome::Duplicate);
        assert_eq!(dir_entries(tmp.path()), vec!["a.jpg"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_no_file_and_no_fingerprint() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = writer(&[("http://x/empty.jpg", "")]);

        let missing = writer
            .save_one(0, &tmp.path().join("m.jpg"), "http://x/missing.jpg")
            .await;
        let empty = writer
            .save_one(0, &tmp.path().join("e.jpg"), "http://x/empty.jpg")
            .await;

        assert_eq!(missing, SaveOutcome::FetchFailed);
        assert_eq!(empty, SaveOutcome::FetchFailed);
        assert!(writer.ledger().is_empty());
        assert!(dir_entries(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = writer(&[("http://x/a.jpg", "A"), ("http://x/b.jpg", "B")]);

        let bad = writer
            .save_one(0, &tmp.path().join("no-such-dir/a.jpg"), "http://x/a.jpg")
            .await;
        let good = writer
            .save_one(0, &tmp.path().join("b.jpg"), "http://x/b.jpg")
            .await;

        assert_eq!(bad, SaveOutcome::WriteFailed);
        assert_eq!(good, SaveOutcome::Saved);
        assert_eq!(writer.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_write_atomic_refuses_to_replace() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("taken.jpg");
        std::fs::write(&path, b"original").unwrap();

        let err = write_atomic(&path, b"new").await.unwrap_err();

        assert!(matches!(err, Error::DestinationExists(_)));
        assert_eq!(std::fs::read(&path).unwrap(), b"original");
        assert_eq!(dir_entries(tmp.path()), vec!["taken.jpg"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_writes_keep_the_first_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("raced.jpg");

        let writes: Vec<_> = (0..8u8)
            .map(|i| {
                let path = path.clone();
                tokio::spawn(async move { write_atomic(&path, &[i; 64]).await })
            })
            .collect();

        let mut saved = 0;
        for write in writes {
            match write.await.unwrap() {
                Ok(()) => saved += 1,
                Err(e) => assert!(matches!(e, Error::DestinationExists(_))),
            }
        }

        assert_eq!(saved, 1);
        let content = std::fs::read(&path).unwrap();
        assert_eq!(content.len(), 64);
        assert!(content.iter().all(|b| *b == content[0]));
        assert_eq!(dir_entries(tmp.path()), vec!["raced.jpg"]);
    }
}
