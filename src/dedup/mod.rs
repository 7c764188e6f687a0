//! Deduplication module.
//!
//! Provides:
//! - Content fingerprints (MD5 of the downloaded bytes)
//! - A ledger shared by download workers to suppress byte-identical writes

pub mod hash;
pub mod ledger;

pub use hash::ContentFingerprint;
pub use ledger::DedupLedger;
