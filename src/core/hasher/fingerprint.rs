//! The fingerprint value produced by the difference hasher.

use crate::error::FingerprintParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed-length, row-major sequence of `bit_width²` gradient bits.
///
/// Bits are packed most-significant-first: bit index `i` lives in byte
/// `i / 8` at position `7 - i % 8`. Unused trailing bits of the last byte
/// are always zero.
///
/// The serialized form keeps the bit width next to the hex payload
/// (`"8:00ff..."`) so a fingerprint read back from storage can still be
/// length-checked before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint {
    bit_width: u32,
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Build a fingerprint from exactly `bit_width²` bits in row-major order.
    ///
    /// Missing bits are treated as zero and extra bits are ignored, so
    /// callers that produce the wrong count get a well-formed value rather
    /// than a panic. The hasher always yields the exact count.
    pub fn from_bits<I>(bit_width: u32, bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let len = bit_count(bit_width);
        let mut bytes = vec![0u8; byte_count(len)];

        for (index, bit) in bits.into_iter().take(len).enumerate() {
            if bit {
                bytes[index / 8] |= 1 << (7 - index % 8);
            }
        }

        Self { bit_width, bytes }
    }

    /// Grid dimension N this fingerprint was generated with
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Number of bits (always `bit_width²`)
    pub fn len(&self) -> usize {
        bit_count(self.bit_width)
    }

    /// True only for the degenerate zero-width fingerprint
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit at a row-major index
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len() {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Bit for the comparison between column `col` and `col + 1` of `row`
    pub fn bit_at(&self, row: u32, col: u32) -> Option<bool> {
        if row >= self.bit_width || col >= self.bit_width {
            return None;
        }
        self.bit(row as usize * self.bit_width as usize + col as usize)
    }

    /// Iterate all bits in row-major order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bytes[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Packed bytes, most significant bit first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Packed bytes as lowercase hex
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// One '0' or '1' character per bit, row-major
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|bit| if bit { '1' } else { '0' }).collect()
    }

    /// The bits as an unsigned integer, bit 0 being the most significant.
    ///
    /// Only available when the fingerprint fits in 64 bits (bit width ≤ 8).
    pub fn to_u64(&self) -> Option<u64> {
        if self.len() > 64 {
            return None;
        }
        Some(self.iter().fold(0u64, |acc, bit| (acc << 1) | bit as u64))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bit_width, self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, hex) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| FingerprintParseError::MissingSeparator {
                input: s.to_string(),
            })?;

        let bit_width = match width.parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => {
                return Err(FingerprintParseError::BadBitWidth {
                    value: width.to_string(),
                })
            }
        };

        let expected = byte_count(bit_count(bit_width)) * 2;
        if hex.len() != expected {
            return Err(FingerprintParseError::WrongLength {
                bit_width,
                expected,
                actual: hex.len(),
            });
        }

        let bytes = decode_hex(hex)?;

        let used_bits = bit_count(bit_width) % 8;
        if used_bits != 0 {
            let padding_mask = 0xFFu8 >> used_bits;
            if bytes.last().is_some_and(|last| last & padding_mask != 0) {
                return Err(FingerprintParseError::NonZeroPadding);
            }
        }

        Ok(Self { bit_width, bytes })
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_string()
    }
}

fn bit_count(bit_width: u32) -> usize {
    bit_width as usize * bit_width as usize
}

fn byte_count(bits: usize) -> usize {
    bits.div_ceil(8)
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, FingerprintParseError> {
    let bad_hex = || FingerprintParseError::BadHex {
        value: hex.to_string(),
    };

    if !hex.is_ascii() {
        return Err(bad_hex());
    }

    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(bad_hex)
        })
        .collect()
}
