//! # Error Module
//!
//! Typed errors for fingerprinting and comparing images.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, sizes, what went wrong
//! - **Name the condition** - every message says which input was rejected

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DhashError {
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Invalid fingerprint: {0}")]
    Parse(#[from] FingerprintParseError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by the image decoder collaborator
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {source_name}: {reason}")]
    Undecodable { source_name: String, reason: String },

    #[error("Image source is empty: {source_name}")]
    Empty { source_name: String },
}

/// Errors raised while generating a fingerprint
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HashError {
    #[error("Invalid input: image has zero width ({width}x{height})")]
    ZeroWidth { width: u32, height: u32 },

    #[error("Invalid input: image has zero height ({width}x{height})")]
    ZeroHeight { width: u32, height: u32 },

    #[error("Invalid input: bit width must be at least 1")]
    ZeroBitWidth,

    #[error("Invalid input: bit width {value} exceeds the maximum of {max}")]
    BitWidthTooLarge { value: u32, max: u32 },

    #[error("Resize failed: {0}")]
    Resize(String),
}

impl HashError {
    /// Whether this error is an input precondition violation
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, HashError::Resize(_))
    }
}

/// Errors raised when comparing two fingerprints
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompareError {
    #[error("Length mismatch: cannot compare a {left}-bit fingerprint with a {right}-bit fingerprint")]
    LengthMismatch { left: usize, right: usize },
}

/// Errors raised when parsing a serialized fingerprint
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FingerprintParseError {
    #[error("expected `<bit width>:<hex>`, got {input:?}")]
    MissingSeparator { input: String },

    #[error("bit width {value:?} is not a positive integer")]
    BadBitWidth { value: String },

    #[error("invalid hex digit in {value:?}")]
    BadHex { value: String },

    #[error("expected {expected} hex characters for bit width {bit_width}, got {actual}")]
    WrongLength {
        bit_width: u32,
        expected: usize,
        actual: usize,
    },

    #[error("padding bits after the last fingerprint bit must be zero")]
    NonZeroPadding,
}

/// Errors raised while writing a comparison or hash report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DhashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_includes_path() {
        let error = DecodeError::Io {
            path: PathBuf::from("/photos/missing.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/missing.jpg"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn length_mismatch_names_both_lengths() {
        let error = CompareError::LengthMismatch {
            left: 64,
            right: 100,
        };
        let message = error.to_string();
        assert!(message.contains("Length mismatch"));
        assert!(message.contains("64"));
        assert!(message.contains("100"));
    }

    #[test]
    fn invalid_input_is_named() {
        let error = HashError::ZeroWidth {
            width: 0,
            height: 10,
        };
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("Invalid input"));
        assert!(!HashError::Resize("boom".to_string()).is_invalid_input());
    }

    #[test]
    fn top_level_wraps_sources() {
        let error: DhashError = HashError::ZeroBitWidth.into();
        assert!(matches!(error, DhashError::Hash(HashError::ZeroBitWidth)));
        assert!(error.to_string().starts_with("Hashing error"));
    }

    #[test]
    fn report_error_wraps_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: DhashError = ReportError::from(io).into();
        assert!(matches!(error, DhashError::Report(ReportError::Write(_))));
        assert!(error.to_string().contains("pipe closed"));
    }
}
