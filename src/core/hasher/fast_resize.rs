//! Fast SIMD-accelerated grayscale resizing.
//!
//! Uses fast_image_resize, which picks AVX2/NEON kernels when available.
//! The box filter averages every source pixel that falls under a destination
//! pixel, so downscaling is an area average rather than point sampling.

use crate::error::HashError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::GrayImage;

/// Reusable area-averaging resizer for 8-bit luminance images
pub struct FastResizer {
    resizer: Resizer,
    options: ResizeOptions,
}

impl FastResizer {
    /// Create a new resizer using the box (area) filter
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box)),
        }
    }

    /// Resize a grayscale image to exactly `width` x `height`.
    ///
    /// Both the source and the destination must have non-zero dimensions;
    /// callers validate user input before reaching this point.
    pub fn resize(
        &mut self,
        gray: &GrayImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, HashError> {
        let (src_width, src_height) = gray.dimensions();

        if src_width == 0 || src_height == 0 || width == 0 || height == 0 {
            return Err(HashError::Resize(format!(
                "cannot resize {}x{} to {}x{}",
                src_width, src_height, width, height
            )));
        }

        if (src_width, src_height) == (width, height) {
            return Ok(gray.clone());
        }

        let src_image = Image::from_vec_u8(src_width, src_height, gray.as_raw().clone(), PixelType::U8)
            .map_err(|e| HashError::Resize(format!("failed to wrap source image: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        self.resizer
            .resize(&src_image, &mut dst_image, &self.options)
            .map_err(|e| HashError::Resize(e.to_string()))?;

        GrayImage::from_raw(width, height, dst_image.into_vec())
            .ok_or_else(|| HashError::Resize("destination buffer has the wrong size".to_string()))
    }
}

impl Default for FastResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off resizing
pub fn resize_grayscale(gray: &GrayImage, width: u32, height: u32) -> Result<GrayImage, HashError> {
    FastResizer::new().resize(gray, width, height)
}
