//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Converting the image to BT.601 luminance
//! 2. Area-averaging it down to (bit_width + 1) x bit_width
//! 3. Comparing each pixel to the one to its right
//! 4. If the left pixel is brighter, setting the bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes and ignores
//! absolute brightness.

use super::fast_resize::FastResizer;
use super::fingerprint::Fingerprint;
use super::grayscale::to_grayscale;
use super::MAX_BIT_WIDTH;
use crate::error::HashError;
use image::{DynamicImage, GenericImageView, GrayImage};

/// Difference Hash (dHash) implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifferenceHasher {
    /// Rows and comparisons per row of the hash grid
    bit_width: u32,
}

impl DifferenceHasher {
    /// Create a hasher for `bit_width²`-bit fingerprints
    pub fn new(bit_width: u32) -> Result<Self, HashError> {
        validate_bit_width(bit_width)?;
        Ok(Self { bit_width })
    }

    /// The grid dimension N
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Compute the fingerprint of an already-decoded image
    pub fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        let (width, height) = image.dimensions();
        validate_dimensions(width, height)?;

        let gray = to_grayscale(image);
        self.hash_grayscale(&gray)
    }

    /// Compute the fingerprint of an image that is already luminance
    pub fn hash_grayscale(&self, gray: &GrayImage) -> Result<Fingerprint, HashError> {
        let (width, height) = gray.dimensions();
        validate_dimensions(width, height)?;

        // One extra column so every row yields bit_width comparisons
        let grid = FastResizer::new().resize(gray, self.bit_width + 1, self.bit_width)?;

        Ok(gradient_bits(&grid, self.bit_width))
    }
}

/// Row-major "left brighter than right" bits of a (n+1) x n grid.
///
/// Python's `imagehash.dhash` sets a bit when the right pixel is brighter,
/// so a dark-left / light-right edge sets bits there and none here. Away
/// from equal neighbours (0 under both rules) the two hashes are bitwise
/// complements and give the same distances.
fn gradient_bits(grid: &GrayImage, bit_width: u32) -> Fingerprint {
    let bits = (0..bit_width).flat_map(move |y| {
        (0..bit_width).map(move |x| grid.get_pixel(x, y)[0] > grid.get_pixel(x + 1, y)[0])
    });
    Fingerprint::from_bits(bit_width, bits)
}

fn validate_bit_width(bit_width: u32) -> Result<(), HashError> {
    if bit_width == 0 {
        return Err(HashError::ZeroBitWidth);
    }
    if bit_width > MAX_BIT_WIDTH {
        return Err(HashError::BitWidthTooLarge {
            value: bit_width,
            max: MAX_BIT_WIDTH,
        });
    }
    Ok(())
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), HashError> {
    if width == 0 {
        return Err(HashError::ZeroWidth { width, height });
    }
    if height == 0 {
        return Err(HashError::ZeroHeight { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    fn create_solid_image(r: u8, g: u8, b: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(100, 100, |_, _| Rgb([r, g, b]));
        DynamicImage::ImageRgb8(img)
    }

    fn create_left_to_right_gradient() -> DynamicImage {
        // Left is dark, right is bright (left < right)
        let img = ImageBuffer::from_fn(100, 100, |x, _| {
            let brightness = (x * 255 / 99) as u8;
            Rgb([brightness, brightness, brightness])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn create_right_to_left_gradient() -> DynamicImage {
        // Left is bright, right is dark (left > right)
        let img = ImageBuffer::from_fn(100, 100, |x, _| {
            let brightness = ((99 - x) * 255 / 99) as u8;
            Rgb([brightness, brightness, brightness])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn split_image(left: u8, right: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(16, 8, |x, _| Luma([if x < 8 { left } else { right }]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let image = create_solid_image(128, 128, 128);

        let hash1 = hasher.hash_image(&image).unwrap();
        let hash2 = hasher.hash_image(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn solid_image_hashes_to_all_zero() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let hash = hasher.hash_image(&create_solid_image(200, 40, 90)).unwrap();

        assert_eq!(hash.len(), 64);
        assert_eq!(hash.count_ones(), 0);
        assert_eq!(hash.to_u64(), Some(0));
    }

    #[test]
    fn brightening_gradient_sets_no_bits() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let hash = hasher.hash_image(&create_left_to_right_gradient()).unwrap();
        assert_eq!(hash.count_ones(), 0);
    }

    #[test]
    fn darkening_gradient_sets_every_bit() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let hash = hasher.hash_image(&create_right_to_left_gradient()).unwrap();
        assert_eq!(hash.count_ones(), 64);
    }

    #[test]
    fn light_to_dark_split_sets_only_the_straddling_columns() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let hash = hasher.hash_image(&split_image(255, 0)).unwrap();

        // The 16px edge lands inside grid column 4 of 9, so columns 3 and 4
        // are the only comparisons that cross it.
        for row in 0..8 {
            for col in 0..8 {
                let expected = col == 3 || col == 4;
                assert_eq!(
                    hash.bit_at(row, col),
                    Some(expected),
                    "row {} col {}",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn dark_to_light_split_sets_no_bits() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let hash = hasher.hash_image(&split_image(0, 255)).unwrap();
        assert_eq!(hash.count_ones(), 0);
    }

    #[test]
    fn bit_width_affects_output_length() {
        let image = create_right_to_left_gradient();

        for bit_width in [1, 2, 5, 8, 16] {
            let hasher = DifferenceHasher::new(bit_width).unwrap();
            let hash = hasher.hash_image(&image).unwrap();
            assert_eq!(hash.len(), (bit_width * bit_width) as usize);
            assert_eq!(hash.bit_width(), bit_width);
        }
    }

    #[test]
    fn one_pixel_image_is_valid() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(1, 1, Rgb([5, 6, 7])));
        let hash = DifferenceHasher::new(8).unwrap().hash_image(&image).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash.count_ones(), 0);
    }

    #[test]
    fn rejects_zero_width_image() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let image = DynamicImage::new_rgb8(0, 10);
        assert_eq!(
            hasher.hash_image(&image),
            Err(HashError::ZeroWidth {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn rejects_zero_height_image() {
        let hasher = DifferenceHasher::new(8).unwrap();
        let image = DynamicImage::new_rgb8(10, 0);
        assert_eq!(
            hasher.hash_image(&image),
            Err(HashError::ZeroHeight {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn rejects_bad_bit_width() {
        assert_eq!(DifferenceHasher::new(0), Err(HashError::ZeroBitWidth));
        assert!(matches!(
            DifferenceHasher::new(MAX_BIT_WIDTH + 1),
            Err(HashError::BitWidthTooLarge { .. })
        ));
        assert!(DifferenceHasher::new(MAX_BIT_WIDTH).is_ok());
    }
}
