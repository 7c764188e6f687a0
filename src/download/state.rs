//! Run statistics.

use crate::download::writer::SaveOutcome;

/// Counters for one run of the pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Candidate links consumed from discovery.
    pub discovered: u64,
    /// Candidates that did not classify as downloadable media.
    pub rejected: u64,
    /// Candidates whose destination file already existed.
    pub skipped_existing: u64,
    /// Entries added to the registry.
    pub registered: u64,
    /// Files written.
    pub downloaded: u64,
    /// Entries whose content was already written under another path.
    pub skipped_duplicate: u64,
    /// Entries whose fetch or write failed.
    pub failed: u64,
}

impl RunStats {
    /// Count the outcome of one registry entry.
    pub fn record_outcome(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved => self.downloaded += 1,
            SaveOutcome::Duplicate => self.skipped_duplicate += 1,
            SaveOutcome::FetchFailed | SaveOutcome::WriteFailed | SaveOutcome::Panicked => {
                self.failed += 1
            }
        }
    }

    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &RunStats) {
        self.discovered += other.discovered;
        self.rejected += other.rejected;
        self.skipped_existing += other.skipped_existing;
        self.registered += other.registered;
        self.downloaded += other.downloaded;
        self.skipped_duplicate += other.skipped_duplicate;
        self.failed += other.failed;
    }

    /// Registry entries that went through a worker.
    pub fn processed(&self) -> u64 {
        self.downloaded + self.skipped_duplicate + self.failed
    }
}
