//! Filename generation.

use std::path::Path;

use uuid::Uuid;

use crate::error::{Error, Result};

/// Number of title characters kept in a destination file name.
pub const TITLE_PREFIX_CHARS: usize = 30;

/// Separator between the parts of a destination file name.
const PART_SEPARATOR: &str = "__";

/// Keep only alphanumerics, `.`, `_`, `-` and spaces.
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect()
}

/// Sanitize the leading part of a post title for use in a file name.
pub fn sanitize_title(title: &str) -> String {
    let prefix: String = title.chars().take(TITLE_PREFIX_CHARS).collect();
    sanitize_string(&prefix)
}

/// Build the destination file name `{user}__{short_id}__{title}.{extension}`.
pub fn destination_file_name(user: &str, short_id: &str, title: &str, extension: &str) -> String {
    format!(
        "{}{sep}{}{sep}{}.{}",
        sanitize_string(user),
        sanitize_string(short_id),
        sanitize_title(title),
        extension,
        sep = PART_SEPARATOR
    )
}

/// Sanitize a path component (folder name) for the output tree.
///
/// Rejects traversal and empty names rather than rewriting them.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::ConfigValidation {
            field: "target".to_string(),
            message: format!("Path traversal detected: '{}'", name),
        });
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "target".to_string(),
            message: "Path component cannot be empty or whitespace-only".to_string(),
        });
    }

    Ok(sanitized)
}

/// Name of the hidden temp file a download is staged in before the final rename.
pub fn temp_file_name(destination: &Path) -> String {
    let name = destination
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download");
    format!(".{}.{}.part", name, Uuid::new_v4().simple())
}
