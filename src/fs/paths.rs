//! Output directory resolution.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_path_component;
use crate::media::MediaType;

/// Resolved roots that downloaded files are written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoots {
    pub image_root: PathBuf,
    pub video_root: PathBuf,
}

impl OutputRoots {
    /// Create output roots from explicit paths.
    pub fn new(image_root: impl Into<PathBuf>, video_root: impl Into<PathBuf>) -> Self {
        Self {
            image_root: image_root.into(),
            video_root: video_root.into(),
        }
    }

    /// Resolve `{output}/{target}/img` and `{output}/{target}/video` from the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let output = config
            .options
            .output_directory
            .as_ref()
            .ok_or_else(|| Error::MissingConfig("output_directory".to_string()))?;

        let target = config.target().ok_or_else(|| {
            Error::MissingConfig("target (either a user or a subreddit is required)".to_string())
        })?;

        let base = output.join(sanitize_path_component(target.name())?);

        Ok(Self::new(
            base.join(MediaType::Image.folder_name()),
            base.join(MediaType::Video.folder_name()),
        ))
    }

    /// Get the root for a media type.
    pub fn root_for(&self, media_type: MediaType) -> &Path {
        match media_type {
            MediaType::Image => &self.image_root,
            MediaType::Video => &self.video_root,
        }
    }

    /// Ensure both roots exist, creating them if necessary.
    pub fn ensure(&self) -> Result<()> {
        ensure_dir(&self.image_root)?;
        ensure_dir(&self.video_root)?;
        Ok(())
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
