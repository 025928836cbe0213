//! # dhash-compare
//!
//! Perceptual fingerprints for images, and a distance between them.
//!
//! A difference hash (dHash) records, for a small area-averaged luminance
//! grid, whether each pixel is brighter than its right-hand neighbour. Two
//! images that look alike produce fingerprints that differ in few bits, even
//! after re-encoding or resizing, so the Hamming distance between
//! fingerprints works as a dissimilarity score.
//!
//! ## Architecture
//! - `core` - Decoding, hashing and comparison
//! - `error` - Typed errors for every failure mode
//!
//! ## Example
//! ```rust,ignore
//! use dhash_compare::core::{distance, generate_fingerprint};
//!
//! let a = generate_fingerprint(&image::open("a.jpg")?, 8)?;
//! let b = generate_fingerprint(&image::open("b.jpg")?, 8)?;
//! println!("{}", distance(&a, &b)?);
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{DhashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// overrides `default_level` when set.
pub fn init_tracing(default_level: tracing::level_filters::LevelFilter) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // A subscriber may already be installed (tests, embedding applications)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
