//! # Comparator Module
//!
//! Measures how different two fingerprints are.
//!
//! ## How It Works
//! 1. Check both fingerprints have the same bit length
//! 2. Count differing bits (Hamming distance)
//! 3. Optionally classify the distance for reporting
//!
//! ## Classification (on the 64-bit scale)
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11-15    | Maybe similar |
//! | 16+      | Different     |
//!
//! Other lengths are scaled onto the same table with [`scaled_distance`],
//! and duplicate thresholds are read on that scale too.

mod traits;

pub use traits::{ComparisonStrategy, ThresholdStrategy};

use crate::core::hasher::Fingerprint;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};

/// Hamming distance between two fingerprints of the same length.
///
/// Symmetric, zero only for identical fingerprints, and bounded by the
/// fingerprint length. Fingerprints of different lengths are never
/// compared, not even by prefix.
pub fn distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, CompareError> {
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    // Padding bits are zero on both sides, so they never contribute
    Ok(a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum())
}

/// Similarity as a percentage (0-100)
pub fn similarity(a: &Fingerprint, b: &Fingerprint) -> Result<f64, CompareError> {
    let distance = distance(a, b)?;
    Ok(similarity_percent(distance, a.len()))
}

fn similarity_percent(distance: u32, bits: usize) -> f64 {
    if bits == 0 {
        return 100.0;
    }
    (1.0 - (distance as f64 / bits as f64)) * 100.0
}

/// Rescale a distance between `bits`-bit fingerprints onto the 64-bit scale.
///
/// Rounds up, so any difference at all is never scaled down to zero.
pub fn scaled_distance(distance: u32, bits: usize) -> u32 {
    if bits == 0 {
        return 0;
    }
    let scaled = (distance as u64 * 64).div_ceil(bits as u64);
    scaled.min(u32::MAX as u64) as u32
}

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical fingerprints
    Exact,
    /// Distance 1-4, virtually identical
    NearExact,
    /// Distance 5-10, likely the same picture
    Similar,
    /// Distance 11-15, possibly related
    MaybeSimilar,
    /// Distance 16+
    Different,
}

impl MatchType {
    /// Classify a distance between two 64-bit fingerprints
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=10 => MatchType::Similar,
            11..=15 => MatchType::MaybeSimilar,
            _ => MatchType::Different,
        }
    }

    /// Classify a distance between fingerprints of `bits` bits
    pub fn for_length(distance: u32, bits: usize) -> Self {
        Self::from_distance(scaled_distance(distance, bits))
    }

    /// Check if this match type is a duplicate under the balanced preset
    pub fn is_duplicate(&self) -> bool {
        matches!(self, MatchType::Exact | MatchType::NearExact | MatchType::Similar)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::MaybeSimilar => write!(f, "Possibly Similar"),
            MatchType::Different => write!(f, "Different"),
        }
    }
}

/// Result of comparing two images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Label of the first image (path or buffer name)
    pub source_a: String,
    /// Label of the second image
    pub source_b: String,
    /// Fingerprint of the first image
    pub fingerprint_a: Fingerprint,
    /// Fingerprint of the second image
    pub fingerprint_b: Fingerprint,
    /// Hamming distance between the fingerprints
    pub distance: u32,
    /// Similarity as a percentage (0-100)
    pub similarity_percent: f64,
    /// Classification of the match
    pub match_type: MatchType,
    /// Whether the strategy considers the pair duplicates
    pub is_duplicate: bool,
}

impl MatchResult {
    /// Compare two fingerprints and record the outcome
    pub fn compare(
        source_a: impl Into<String>,
        fingerprint_a: Fingerprint,
        source_b: impl Into<String>,
        fingerprint_b: Fingerprint,
        strategy: &dyn ComparisonStrategy,
    ) -> Result<Self, CompareError> {
        let distance = distance(&fingerprint_a, &fingerprint_b)?;
        let bits = fingerprint_a.len();

        Ok(Self {
            source_a: source_a.into(),
            source_b: source_b.into(),
            distance,
            similarity_percent: similarity_percent(distance, bits),
            match_type: strategy.classify(distance, bits),
            is_duplicate: strategy.is_duplicate(distance, bits),
            fingerprint_a,
            fingerprint_b,
        })
    }
}
