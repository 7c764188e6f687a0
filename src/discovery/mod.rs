//! Discovery module: the boundary to the browser side.
//!
//! Provides:
//! - Parsing of the candidate link stream
//! - Resolution of links that wrap their media in an HTML page

pub mod inspect;
pub mod source;

pub use inspect::{resolve_inspectable, ResolvedMedia};
pub use source::{open_source, read_candidates};
