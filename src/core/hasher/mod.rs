//! # Hasher Module
//!
//! Computes difference-hash (dHash) fingerprints for decoded images.
//!
//! ## How It Works
//! 1. Convert to BT.601 luminance
//! 2. Area-average down to (N+1) x N
//! 3. Set one bit per pixel: is it brighter than its right-hand neighbour?
//! 4. Pack the N x N bits row-major
//!
//! The resulting fingerprint is compared with Hamming distance (see
//! [`crate::core::comparator`]).
//!
//! ## Example
//! ```rust,ignore
//! use dhash_compare::core::hasher::HasherConfig;
//!
//! let hasher = HasherConfig::new().hash_size(16).build()?;
//! let fingerprint = hasher.hash_image(&image)?;
//! assert_eq!(fingerprint.len(), 256);
//! ```

mod difference;
pub mod fast_resize;
mod fingerprint;
pub mod grayscale;

pub use difference::DifferenceHasher;
pub use fingerprint::Fingerprint;

use crate::error::HashError;
use image::DynamicImage;

/// Bit width used when none is given (64-bit fingerprints)
pub const DEFAULT_BIT_WIDTH: u32 = 8;

/// Largest accepted bit width (65536-bit fingerprints)
pub const MAX_BIT_WIDTH: u32 = 256;

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Grid dimension N; fingerprints have N² bits
    hash_size: u32,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            hash_size: DEFAULT_BIT_WIDTH,
        }
    }

    /// Set the bit width N
    ///
    /// - 8: 64 bits, the conventional size
    /// - 16: 256 bits, finer detail
    /// - 32: 1024 bits, finest detail, least tolerant of edits
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    /// Build the hasher, validating the bit width
    pub fn build(self) -> Result<DifferenceHasher, HashError> {
        DifferenceHasher::new(self.hash_size)
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the `bit_width²`-bit difference hash of a decoded image.
///
/// Fails with an invalid-input error if either image dimension or the
/// bit width is zero.
pub fn generate_fingerprint(image: &DynamicImage, bit_width: u32) -> Result<Fingerprint, HashError> {
    DifferenceHasher::new(bit_width)?.hash_image(image)
}
