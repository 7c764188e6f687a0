//! Partitioned fan-out of registry entries to download workers.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use futures::FutureExt;
use indicatif::ProgressBar;
use tokio::task::JoinSet;

use crate::download::registry::ContentRegistry;
use crate::download::state::RunStats;
use crate::download::writer::{FileWriter, SaveOutcome};

/// Drains a [`ContentRegistry`] into batches, one worker task per batch.
///
/// Batches are cut before dispatch, so no two workers ever see the same entry.
pub struct DownloadScheduler {
    writer: FileWriter,
    progress: Option<ProgressBar>,
}

impl DownloadScheduler {
    /// Create a scheduler around a file writer.
    pub fn new(writer: FileWriter) -> Self {
        Self {
            writer,
            progress: None,
        }
    }

    /// Tick `progress` once per processed entry.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Download everything in `registry` with up to `concurrency` workers per pass.
    ///
    /// Each pass cuts `ceil(len / concurrency)`-sized batches; passes repeat
    /// until the registry is empty. Returns only after every worker finished.
    pub async fn run_all(&self, registry: &ContentRegistry, concurrency: usize) -> RunStats {
        let concurrency = concurrency.max(1);
        let mut workers = JoinSet::new();
        let mut next_worker = 0usize;
        let mut drained = 0u64;

        while !registry.is_empty() {
            let batch_size = registry.len().div_ceil(concurrency);

            for _ in 0..concurrency {
                let batch = registry.drain_batch(batch_size);
                if batch.is_empty() {
                    break;
                }

                drained += batch.len() as u64;
                tracing::info!(
                    "Starting worker W-{} with {} file(s)",
                    next_worker,
                    batch.len()
                );
                workers.spawn(save_batch(
                    next_worker,
                    self.writer.clone(),
                    batch,
                    self.progress.clone(),
                ));
                next_worker += 1;
            }
        }

        let mut stats = RunStats::default();
        while let Some(result) = workers.join_next().await {
            match result {
                Ok(batch_stats) => stats.merge(&batch_stats),
                Err(e) => tracing::error!("Download worker aborted: {}", e),
            }
        }

        // Entries of a worker that died before reporting still count as processed.
        let unreported = drained.saturating_sub(stats.processed());
        if unreported > 0 {
            tracing::error!("{} file(s) lost with aborted workers", unreported);
            stats.failed += unreported;
        }

        tracing::debug!("{} worker(s) finished", next_worker);
        stats
    }
}

/// Process one batch sequentially.
async fn save_batch(
    worker: usize,
    writer: FileWriter,
    batch: HashMap<PathBuf, String>,
    progress: Option<ProgressBar>,
) -> RunStats {
    let mut stats = RunStats::default();

    for (path, url) in batch {
        let outcome = AssertUnwindSafe(writer.save_one(worker, &path, &url))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!(
                    "W-{}: Download of {} ({}) panicked",
                    worker,
                    path.display(),
                    url
                );
                SaveOutcome::Panicked
            });
        stats.record_outcome(outcome);

        if let Some(ref bar) = progress {
            bar.inc(1);
        }
    }

    stats
}
