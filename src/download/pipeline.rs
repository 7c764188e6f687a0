//! Registration and download phases of one run.

use std::sync::Arc;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::dedup::DedupLedger;
use crate::discovery::resolve_inspectable;
use crate::download::fetcher::Fetcher;
use crate::download::registry::{ContentRegistry, Registration};
use crate::download::scheduler::DownloadScheduler;
use crate::download::state::RunStats;
use crate::download::writer::FileWriter;
use crate::fs::OutputRoots;
use crate::media::{classify, CandidateLink};

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub only_videos: bool,
    pub concurrency: usize,
    pub show_skipped: bool,
}

impl PipelineOptions {
    /// Options from the download configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            only_videos: config.options.only_videos,
            concurrency: config.options.concurrency,
            show_skipped: config.options.show_skipped_downloads,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            only_videos: false,
            concurrency: crate::config::DEFAULT_CONCURRENCY,
            show_skipped: false,
        }
    }
}

/// One run: candidates go in, files come out.
pub struct Pipeline {
    options: PipelineOptions,
    fetcher: Arc<dyn Fetcher>,
    ledger: Arc<DedupLedger>,
    registry: ContentRegistry,
    stats: RunStats,
}

impl Pipeline {
    /// Create a pipeline writing under `roots`.
    pub fn new(roots: OutputRoots, fetcher: Arc<dyn Fetcher>, options: PipelineOptions) -> Self {
        Self {
            options,
            fetcher,
            ledger: Arc::new(DedupLedger::new()),
            registry: ContentRegistry::new(roots),
            stats: RunStats::default(),
        }
    }

    /// Registry of entries waiting for download.
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Classify a candidate and register it if it is downloadable.
    pub async fn discover(&mut self, link: &CandidateLink) {
        self.stats.discovered += 1;

        if link.needs_inspection() {
            self.discover_inspectable(link).await;
            return;
        }

        let classification = classify(&link.url, self.options.only_videos);
        if !classification.downloadable {
            self.stats.rejected += 1;
            tracing::debug!("Not a downloadable media link: {}", link.url);
            return;
        }

        self.register(&link.url, link.user_or_default(), link.title_or_default());
    }

    /// Run [`Pipeline::discover`] over every candidate.
    pub async fn discover_all<I>(&mut self, links: I)
    where
        I: IntoIterator<Item = CandidateLink>,
    {
        for link in links {
            self.discover(&link).await;
        }
        tracing::info!(
            "{} link(s) registered for download ({} already on disk, {} rejected)",
            self.registry.len(),
            self.stats.skipped_existing,
            self.stats.rejected
        );
    }

    async fn discover_inspectable(&mut self, link: &CandidateLink) {
        tracing::info!("Inspecting page for media: {}", link.url);

        match resolve_inspectable(self.fetcher.as_ref(), link).await {
            Ok(Some(media)) => self.register(&media.url, &media.user, &media.title),
            Ok(None) => {
                self.stats.rejected += 1;
                tracing::debug!("No media announced by {}", link.url);
            }
            Err(e) => {
                self.stats.rejected += 1;
                tracing::warn!("Failed to inspect {}: {}", link.url, e);
            }
        }
    }

    fn register(&mut self, url: &str, user: &str, title: &str) {
        match self.registry.register(url, user, title) {
            Registration::Added(path) => {
                self.stats.registered += 1;
                tracing::debug!("Stored link {} -> {}", url, path.display());
            }
            Registration::AlreadyOnDisk(path) => {
                self.stats.skipped_existing += 1;
                if self.options.show_skipped {
                    tracing::info!("Skipping existing file {}", path.display());
                } else {
                    tracing::debug!("Skipping existing file {}", path.display());
                }
            }
            Registration::Unnameable => {
                self.stats.rejected += 1;
                tracing::debug!("Cannot derive a file name for {}", url);
            }
        }
    }

    /// Download every registered entry and return the final counters.
    pub async fn download(&mut self, progress: Option<ProgressBar>) -> RunStats {
        tracing::info!("Downloading content");

        let writer = FileWriter::new(Arc::clone(&self.fetcher), Arc::clone(&self.ledger))
            .with_show_skipped(self.options.show_skipped);
        let mut scheduler = DownloadScheduler::new(writer);
        if let Some(progress) = progress {
            scheduler = scheduler.with_progress(progress);
        }

        let download_stats = scheduler
            .run_all(&self.registry, self.options.concurrency)
            .await;
        self.stats.merge(&download_stats);

        tracing::info!(
            "Done: {} downloaded, {} duplicate(s), {} failed, {} already on disk",
            self.stats.downloaded,
            self.stats.skipped_duplicate,
            self.stats.failed,
            self.stats.skipped_existing
        );
        self.stats
    }
}
