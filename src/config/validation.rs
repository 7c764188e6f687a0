//! Configuration validation logic.

use crate::config::loader::Config;
use crate::config::target::Target;
use crate::error::{Error, Result};
use regex::Regex;

/// Reddit usernames: 3-20 characters, alphanumeric, hyphens, underscores.
const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_-]{3,20}$";

/// Subreddit names: 2-21 characters, alphanumeric and underscores.
const SUBREDDIT_PATTERN: &str = r"^[A-Za-z0-9_]{2,21}$";

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.options.output_directory.is_none() {
        return Err(Error::MissingConfig("output_directory".to_string()));
    }

    let target = config.target().ok_or_else(|| {
        Error::MissingConfig("target (either a user or a subreddit is required)".to_string())
    })?;
    validate_target(&target)?;

    validate_concurrency(config.options.concurrency)?;
    validate_retries(config.options.max_request_retries)?;

    if let Some(max_files) = config.options.max_files {
        if max_files == 0 {
            return Err(Error::ConfigValidation {
                field: "max_files".to_string(),
                message: "Must be at least 1 when set".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate a crawl target's name.
pub fn validate_target(target: &Target) -> Result<()> {
    let (field, pattern, rule) = match target {
        Target::User(_) => (
            "user",
            USERNAME_PATTERN,
            "3-20 characters: letters, digits, '-' and '_'",
        ),
        Target::Subreddit(_) => (
            "subreddit",
            SUBREDDIT_PATTERN,
            "2-21 characters: letters, digits and '_'",
        ),
    };

    let regex = Regex::new(pattern)?;
    if !regex.is_match(target.name()) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!(
                "'{}' is not a valid name ({}); omit any u/ or r/ prefix",
                target.name(),
                rule
            ),
        });
    }

    Ok(())
}

/// Validate the worker count.
pub fn validate_concurrency(concurrency: usize) -> Result<()> {
    if concurrency == 0 {
        return Err(Error::ConfigValidation {
            field: "concurrency".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate the per-request attempt count.
pub fn validate_retries(retries: u32) -> Result<()> {
    if retries == 0 {
        return Err(Error::ConfigValidation {
            field: "max_request_retries".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    Ok(())
}
