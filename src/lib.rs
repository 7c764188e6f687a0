//! reddit-media-grabber - deduplicated media downloads from reddit feeds
//!
//! This library turns candidate links discovered in a user's or a subreddit's
//! feed into files on disk.
//!
//! # Features
//!
//! - Extension-based classification of images and videos
//! - Resolution of inspectable pages (Open Graph media tags)
//! - Concurrent downloads over partitioned batches
//! - Content deduplication via MD5 fingerprints
//! - Bounded retries and atomic writes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use reddit_media_grabber::{
//!     CandidateLink, Config, HttpFetcher, OutputRoots, Pipeline, PipelineOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(std::path::Path::new("grabber.toml"))?;
//!     let roots = OutputRoots::from_config(&config)?;
//!     roots.ensure()?;
//!
//!     let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
//!     let mut pipeline = Pipeline::new(roots, fetcher, PipelineOptions::from_config(&config));
//!     pipeline
//!         .discover(&CandidateLink::direct(
//!             "https://i.redd.it/abc123.jpg",
//!             "a title",
//!             "u/someone",
//!         ))
//!         .await;
//!
//!     let stats = pipeline.download(None).await;
//!     println!("{} downloaded", stats.downloaded);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod discovery;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use config::{Config, Target};
pub use dedup::{ContentFingerprint, DedupLedger};
pub use download::{Fetcher, HttpFetcher, Pipeline, PipelineOptions, RunStats};
pub use error::{Error, Result};
pub use fs::OutputRoots;
pub use media::{classify, CandidateLink, LinkKind, MediaType};
