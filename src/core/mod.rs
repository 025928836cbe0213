//! # Core Module
//!
//! The fingerprinting engine, independent of any user interface.
//!
//! ## Modules
//! - `decoder` - Turns paths or byte buffers into decoded images
//! - `hasher` - Computes difference-hash fingerprints
//! - `comparator` - Measures Hamming distance between fingerprints
//! - `pipeline` - Decodes, hashes and compares in one call
//!
//! `hasher` and `comparator` are pure: they never log, print or touch the
//! filesystem.

pub mod comparator;
pub mod decoder;
pub mod hasher;
pub mod pipeline;

// Re-export commonly used types
pub use comparator::{distance, MatchResult, MatchType};
pub use decoder::{ImageDecoder, ImageSource, StandardDecoder};
pub use hasher::{generate_fingerprint, DifferenceHasher, Fingerprint, HasherConfig};
