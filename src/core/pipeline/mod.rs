//! # Pipeline Module
//!
//! Wires the decoder, hasher and comparator together.
//!
//! ```text
//! source ─▶ decoder ─▶ hasher ─▶ fingerprint ─┐
//!                                             ├─▶ comparator ─▶ distance
//! source ─▶ decoder ─▶ hasher ─▶ fingerprint ─┘
//! ```
//!
//! The two sides are decoded and hashed on the rayon pool. Decode errors are
//! passed through unchanged; nothing is retried.

use crate::core::comparator::{ComparisonStrategy, MatchResult, ThresholdStrategy};
use crate::core::decoder::{ImageDecoder, ImageSource};
use crate::core::hasher::{DifferenceHasher, Fingerprint};
use crate::error::Result;
use rayon::prelude::*;
use std::time::Instant;

/// Decode one source and compute its fingerprint
pub fn fingerprint_source(
    decoder: &dyn ImageDecoder,
    source: &ImageSource,
    bit_width: u32,
) -> Result<Fingerprint> {
    let hasher = DifferenceHasher::new(bit_width)?;
    fingerprint_with(decoder, &hasher, source)
}

fn fingerprint_with(
    decoder: &dyn ImageDecoder,
    hasher: &DifferenceHasher,
    source: &ImageSource,
) -> Result<Fingerprint> {
    let started = Instant::now();
    let image = decoder.decode(source)?;
    let fingerprint = hasher.hash_image(&image)?;

    tracing::debug!(
        source = %source,
        fingerprint = %fingerprint,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fingerprinted image"
    );
    Ok(fingerprint)
}

/// Fingerprint both sources and measure the distance between them
pub fn compare_sources(
    decoder: &dyn ImageDecoder,
    a: &ImageSource,
    b: &ImageSource,
    bit_width: u32,
) -> Result<MatchResult> {
    compare_sources_with(decoder, a, b, bit_width, &ThresholdStrategy::default())
}

/// [`compare_sources`] with an explicit duplicate strategy
pub fn compare_sources_with(
    decoder: &dyn ImageDecoder,
    a: &ImageSource,
    b: &ImageSource,
    bit_width: u32,
    strategy: &dyn ComparisonStrategy,
) -> Result<MatchResult> {
    let hasher = DifferenceHasher::new(bit_width)?;

    let (fingerprint_a, fingerprint_b) = rayon::join(
        || fingerprint_with(decoder, &hasher, a),
        || fingerprint_with(decoder, &hasher, b),
    );

    let result = MatchResult::compare(a.label(), fingerprint_a?, b.label(), fingerprint_b?, strategy)?;

    tracing::debug!(
        a = %a,
        b = %b,
        distance = result.distance,
        match_type = %result.match_type,
        threshold = strategy.threshold(),
        is_duplicate = result.is_duplicate,
        "compared images"
    );
    Ok(result)
}

/// Fingerprint many sources in parallel.
///
/// Results come back in input order; a failure for one source does not
/// stop the others.
pub fn fingerprint_many(
    decoder: &dyn ImageDecoder,
    sources: &[ImageSource],
    bit_width: u32,
) -> Result<Vec<(ImageSource, Result<Fingerprint>)>> {
    fingerprint_many_with_progress(decoder, sources, bit_width, |_| {})
}

/// [`fingerprint_many`] calling `on_done` once per finished source
pub fn fingerprint_many_with_progress<F>(
    decoder: &dyn ImageDecoder,
    sources: &[ImageSource],
    bit_width: u32,
    on_done: F,
) -> Result<Vec<(ImageSource, Result<Fingerprint>)>>
where
    F: Fn(&ImageSource) + Sync,
{
    let hasher = DifferenceHasher::new(bit_width)?;

    let results = sources
        .par_iter()
        .map(|source| {
            let fingerprint = fingerprint_with(decoder, &hasher, source);
            if let Err(e) = &fingerprint {
                tracing::warn!(source = %source, error = %e, "failed to fingerprint");
            }
            on_done(source);
            (source.clone(), fingerprint)
        })
        .collect();

    Ok(results)
}
