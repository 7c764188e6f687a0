//! Candidate link representation.

use serde::Deserialize;

/// Title used when the discovery layer did not provide one.
pub const UNKNOWN_TITLE: &str = "UNKNOWN_TITLE";

/// Author used when the discovery layer did not provide one.
pub const UNKNOWN_USER: &str = "UNKNOWN";

/// Host whose links are pages around the media.
const INSPECTABLE_HOST: &str = "redgifs.com";

/// Type of media content, which decides the output folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Get the folder name for this media type.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaType::Image => "img",
            MediaType::Video => "video",
        }
    }

    /// Media type for a classification's `is_image` flag.
    pub fn from_is_image(is_image: bool) -> Self {
        if is_image {
            MediaType::Image
        } else {
            MediaType::Video
        }
    }
}

/// How a candidate link should be handled before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Link points directly at a media file.
    #[default]
    Direct,
    /// Link points at a page wrapping the media (gifv, redgifs).
    Inspectable,
}

/// A link extracted from a rendered post, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateLink {
    /// Raw URL as found in the post.
    pub url: String,

    /// Post title or image alt text.
    #[serde(default)]
    pub title: Option<String>,

    /// Post author.
    #[serde(default)]
    pub user: Option<String>,

    /// Kind hint from the discovery layer.
    #[serde(default)]
    pub kind: LinkKind,
}

impl CandidateLink {
    /// Create a direct candidate link.
    pub fn direct(url: impl Into<String>, title: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: Some(title.into()),
            user: Some(user.into()),
            kind: LinkKind::Direct,
        }
    }

    /// Effective title, falling back to [`UNKNOWN_TITLE`].
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
    }

    /// Effective author, falling back to [`UNKNOWN_USER`].
    pub fn user_or_default(&self) -> &str {
        self.user
            .as_deref()
            .map(|u| u.trim_start_matches("u/"))
            .filter(|u| !u.is_empty())
            .unwrap_or(UNKNOWN_USER)
    }

    /// Whether the link needs page inspection.
    ///
    /// Besides the explicit hint, `.gifv` and redgifs links always wrap the
    /// real media.
    pub fn needs_inspection(&self) -> bool {
        if self.kind == LinkKind::Inspectable {
            return true;
        }
        let path = self.url.split('?').next().unwrap_or("").to_lowercase();
        path.ends_with(".gifv") || path.contains(INSPECTABLE_HOST)
    }
}
