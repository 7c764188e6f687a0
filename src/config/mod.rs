//! Configuration module for the reddit-media-grabber.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Crawl target resolution
//! - Configuration validation

pub mod loader;
pub mod target;
pub mod validation;

pub use loader::{
    Config, OptionsConfig, TargetConfig, DEFAULT_CONCURRENCY, DEFAULT_MAX_REQUEST_RETRIES,
};
pub use target::Target;
pub use validation::validate_config;
