//! Media module for candidate links and link classification.

pub mod classify;
pub mod link;

pub use classify::{classify, is_downloadable, is_image_extension, Classification};
pub use link::{CandidateLink, LinkKind, MediaType, UNKNOWN_TITLE, UNKNOWN_USER};
