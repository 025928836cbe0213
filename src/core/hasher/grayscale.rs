//! Luminance conversion.
//!
//! Uses the ITU-R BT.601 weights in 16.16 fixed point:
//!
//! ```text
//! L = (R * 19595 + G * 38470 + B * 7471 + 0x8000) >> 16
//! ```
//!
//! which is `0.299 R + 0.587 G + 0.114 B` rounded to nearest. The weights
//! sum to exactly 65536 so a pure white pixel maps to 255. Alpha is ignored.
//!
//! The `image` crate's own `to_luma8` uses BT.709 weights; the fingerprint
//! bit pattern depends on the weights, so the conversion is done here to keep
//! it fixed regardless of the decoder's defaults.

use image::{DynamicImage, GrayImage, Luma};

const RED_WEIGHT: u32 = 19595;
const GREEN_WEIGHT: u32 = 38470;
const BLUE_WEIGHT: u32 = 7471;

/// Luminance of a single 8-bit RGB pixel
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * RED_WEIGHT + g as u32 * GREEN_WEIGHT + b as u32 * BLUE_WEIGHT;
    ((weighted + 0x8000) >> 16) as u8
}

/// Convert any decoded image to 8-bit luminance.
///
/// Images that are already single-channel keep their values (higher bit
/// depths are scaled down to 8 bits); colour images go through [`luma`].
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    if !image.color().has_color() {
        return image.to_luma8();
    }

    let rgb = image.to_rgb8();
    let mut gray = GrayImage::new(rgb.width(), rgb.height());
    for (dst, src) in gray.pixels_mut().zip(rgb.pixels()) {
        let [r, g, b] = src.0;
        *dst = Luma([luma(r, g, b)]);
    }
    gray
}
