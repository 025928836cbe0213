//! Trait definitions for comparison strategies.

use super::{scaled_distance, MatchType};

/// Strategy trait for deciding whether two images are duplicates
pub trait ComparisonStrategy: Send + Sync {
    /// Whether a distance between `bits`-bit fingerprints counts as a duplicate
    fn is_duplicate(&self, distance: u32, bits: usize) -> bool;

    /// Classify the match type of a distance between `bits`-bit fingerprints
    fn classify(&self, distance: u32, bits: usize) -> MatchType {
        MatchType::for_length(distance, bits)
    }

    /// Threshold on the 64-bit scale
    fn threshold(&self) -> u32;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Threshold on the 64-bit distance scale.
///
/// Distances between longer or shorter fingerprints are rescaled with
/// [`scaled_distance`] before the comparison, so the same threshold means
/// the same fraction of differing bits at every hash size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStrategy {
    threshold: u32,
}

impl ThresholdStrategy {
    /// Create a new threshold strategy
    ///
    /// The presets end on the [`MatchType`] band edges:
    /// - 4: Conservative, exact and near-exact only
    /// - 10: Balanced (default), up to similar
    /// - 15: Permissive, includes possibly similar
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Create a conservative strategy (threshold = 4)
    pub fn conservative() -> Self {
        Self::new(4)
    }

    /// Create a balanced strategy (threshold = 10)
    pub fn balanced() -> Self {
        Self::new(10)
    }

    /// Create a permissive strategy (threshold = 15)
    pub fn permissive() -> Self {
        Self::new(15)
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::balanced()
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_duplicate(&self, distance: u32, bits: usize) -> bool {
        scaled_distance(distance, bits) <= self.threshold
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }

    fn description(&self) -> String {
        format!("distance <= {} of 64 bits counts as a duplicate", self.threshold)
    }
}
