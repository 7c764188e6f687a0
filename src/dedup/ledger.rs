//! Shared ledger of content already written during this run.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::dedup::hash::ContentFingerprint;

/// Set of fingerprints of content written to disk, shared by all workers.
///
/// Lives for one process only; nothing is persisted between runs.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: Mutex<HashSet<ContentFingerprint>>,
}

impl DedupLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` and report whether identical bytes were already recorded.
    ///
    /// Lookup and insert happen under one lock, so of several callers racing
    /// with the same bytes exactly one gets `false`.
    pub fn check_and_record(&self, content: &[u8]) -> bool {
        let fingerprint = ContentFingerprint::of(content);
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        !seen.insert(fingerprint)
    }

    /// Drop the fingerprint of `content`, e.g. after its write failed.
    pub fn forget(&self, content: &[u8]) {
        let fingerprint = ContentFingerprint::of(content);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&fingerprint);
    }

    /// Check whether a fingerprint is known without recording it.
    pub fn contains(&self, fingerprint: &ContentFingerprint) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(fingerprint)
    }

    /// Number of distinct fingerprints recorded.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
