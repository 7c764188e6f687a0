//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// reddit media grabber CLI.
#[derive(Parser, Debug)]
#[command(
    name = "reddit-media-grabber",
    version,
    about = "Download media discovered in a reddit feed",
    long_about = "Reads candidate links extracted from a user's or a subreddit's feed, \
                  keeps the downloadable images and videos, and downloads them \
                  concurrently with content-based deduplication."
)]
pub struct Args {
    /// Target user whose submissions were crawled.
    #[arg(short = 'u', long = "user", env = "GRABBER_USER")]
    pub user: Option<String>,

    /// Target subreddit that was crawled.
    #[arg(short = 's', long = "sub", env = "GRABBER_SUB")]
    pub sub: Option<String>,

    /// Output directory.
    #[arg(short = 'o', long = "output", env = "GRABBER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Download only videos (animated gifs).
    #[arg(short = 'v', long)]
    pub only_videos: bool,

    /// Maximum number of candidate links to consume.
    #[arg(short = 'm', long)]
    pub max_files: Option<usize>,

    /// JSON-lines file of candidate links, or '-' for stdin.
    #[arg(short = 'l', long, default_value = "-")]
    pub links: PathBuf,

    /// Number of concurrent download workers.
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Attempts per media request before giving up.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "grabber.toml")]
    pub config: PathBuf,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Show information about skipped downloads.
    #[arg(long)]
    pub show_skipped: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        // A target given on the command line replaces both configured targets
        if self.user.is_some() || self.sub.is_some() {
            config.target.user = self.user.clone();
            config.target.subreddit = self.sub.clone();
        }

        if let Some(ref output) = self.output {
            config.options.output_directory = Some(output.clone());
        }

        if self.only_videos {
            config.options.only_videos = true;
        }

        if let Some(max_files) = self.max_files {
            config.options.max_files = Some(max_files);
        }

        if let Some(concurrency) = self.concurrency {
            config.options.concurrency = concurrency;
        }

        if let Some(retries) = self.retries {
            config.options.max_request_retries = retries;
        }

        if self.quiet {
            config.options.show_downloads = false;
            config.options.show_skipped_downloads = false;
        }

        if self.show_skipped {
            config.options.show_skipped_downloads = true;
        }
    }
}
