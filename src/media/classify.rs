//! Link classification.
//!
//! Decides whether a candidate URL points at a downloadable media file, which
//! output folder it belongs in, and which extension the saved file gets.

use url::Url;

/// Extensions accepted for download when not restricted to videos.
pub const IMAGE_FILE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "gif", "pjpg"];

/// The only extension accepted in videos-only mode (animated containers).
pub const VIDEO_FILE_EXTENSION: &str = "gif";

/// Result of classifying a candidate link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether the link passes the extension allow-list.
    pub downloadable: bool,

    /// Whether the naming extension is an image extension.
    pub is_image: bool,

    /// Extension used to name the saved file (lowercase, without dot).
    pub extension: String,
}

impl Classification {
    fn rejected() -> Self {
        Self {
            downloadable: false,
            is_image: false,
            extension: String::new(),
        }
    }
}

/// Classify a URL.
///
/// The allow-list is tested against the last path segment with the query
/// string removed. The naming extension prefers an explicit `format` query
/// parameter, since CDNs rewrite the served format that way.
pub fn classify(url: &str, only_videos: bool) -> Classification {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return Classification::rejected(),
    };

    let file_name = parsed.path().rsplit('/').next().unwrap_or("");
    let downloadable = is_downloadable(file_name, only_videos);
    let extension = naming_extension(&parsed);
    let is_image = is_image_extension(&extension);

    Classification {
        downloadable,
        is_image,
        extension,
    }
}

/// Check a file name (query string allowed) against the allow-list.
pub fn is_downloadable(name: &str, only_videos: bool) -> bool {
    let name = name.split('?').next().unwrap_or("").to_lowercase();

    if only_videos {
        return name.ends_with(&format!(".{}", VIDEO_FILE_EXTENSION));
    }

    IMAGE_FILE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{}", ext)))
}

/// Check whether an extension (without dot) belongs to the image allow-list.
pub fn is_image_extension(extension: &str) -> bool {
    let extension = extension.to_lowercase();
    IMAGE_FILE_EXTENSIONS.contains(&extension.as_str())
}

/// Extension used for the destination file name.
pub fn naming_extension(url: &Url) -> String {
    let from_query = url
        .query_pairs()
        .find(|(key, _)| key == "format")
        .map(|(_, value)| value.into_owned());

    let raw = match from_query {
        Some(format) => format,
        None => url
            .path()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default(),
    };

    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Short identifier of a media URL: the last path segment up to its first dot.
pub fn short_id(url: &Url) -> String {
    let file_name = url.path().rsplit('/').next().unwrap_or("");
    file_name.split('.').next().unwrap_or("").to_string()
}
