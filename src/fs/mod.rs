//! Filesystem module.
//!
//! Provides:
//! - Output directory resolution
//! - Destination filename generation and sanitization

pub mod naming;
pub mod paths;

pub use naming::{
    destination_file_name, sanitize_path_component, sanitize_string, sanitize_title,
    temp_file_name,
};
pub use paths::{ensure_dir, OutputRoots};
