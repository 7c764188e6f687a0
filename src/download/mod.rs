//! Download module for the content pipeline.
//!
//! This module provides:
//! - The content registry of accepted links
//! - HTTP fetching with bounded retries
//! - Atomic, deduplicated file writing
//! - Partitioned fan-out of downloads to workers
//! - Run statistics and the pipeline tying it together

pub mod fetcher;
pub mod pipeline;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod writer;

pub use fetcher::{Fetcher, HttpFetcher};
pub use pipeline::{Pipeline, PipelineOptions};
pub use registry::{ContentRegistry, Registration};
pub use scheduler::DownloadScheduler;
pub use state::RunStats;
pub use writer::{FileWriter, SaveOutcome};
