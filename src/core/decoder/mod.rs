//! # Decoder Module
//!
//! Turns an image source (a path or an in-memory buffer) into a decoded
//! pixel grid. Decoding is the only I/O in the system and is kept behind the
//! [`ImageDecoder`] trait so the hasher never sees undecoded input.
//!
//! ## Formats
//! - JPEG: zune-jpeg (1.5-2x faster), with the image crate as fallback
//! - Everything else: image crate, format guessed from the content

mod file_bytes;

pub use file_bytes::{is_jpeg, read_file_bytes, FileBytes};

use crate::error::DecodeError;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk
    Path(PathBuf),
    /// Encoded bytes already in memory, with a label for messages
    Bytes { name: String, data: Vec<u8> },
}

impl ImageSource {
    /// Wrap an in-memory buffer
    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        ImageSource::Bytes {
            name: name.into(),
            data,
        }
    }

    /// Label used in errors and reports
    pub fn label(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(data: Vec<u8>) -> Self {
        ImageSource::bytes("<memory>", data)
    }
}

/// Decodes image sources into pixel grids
pub trait ImageDecoder: Send + Sync {
    /// Decode a source, failing with a [`DecodeError`] for unreadable or
    /// undecodable input
    fn decode(&self, source: &ImageSource) -> Result<DynamicImage, DecodeError>;
}

/// Default decoder backed by zune-jpeg and the image crate
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl StandardDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode encoded bytes, labelling errors with `source_name`
    pub fn decode_bytes(&self, source_name: &str, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty {
                source_name: source_name.to_string(),
            });
        }

        if is_jpeg(bytes) {
            match decode_jpeg(source_name, bytes) {
                Ok(image) => return Ok(image),
                Err(e) => {
                    tracing::debug!(source = source_name, error = %e, "zune-jpeg failed, falling back");
                }
            }
        }

        image::load_from_memory(bytes).map_err(|e| DecodeError::Undecodable {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ImageDecoder for StandardDecoder {
    fn decode(&self, source: &ImageSource) -> Result<DynamicImage, DecodeError> {
        let label = source.label();
        let image = match source {
            ImageSource::Path(path) => {
                let bytes = read_file_bytes(path)?;
                self.decode_bytes(&label, &bytes)?
            }
            ImageSource::Bytes { data, .. } => self.decode_bytes(&label, data)?,
        };

        tracing::debug!(
            source = %label,
            width = image.width(),
            height = image.height(),
            "decoded image"
        );
        Ok(image)
    }
}

/// Fast JPEG decoding using zune-jpeg
fn decode_jpeg(source_name: &str, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let undecodable = |reason: String| DecodeError::Undecodable {
        source_name: source_name.to_string(),
        reason,
    };

    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(bytes, options);

    let pixels = decoder
        .decode()
        .map_err(|e| undecodable(format!("zune-jpeg decode failed: {:?}", e)))?;

    let info = decoder
        .info()
        .ok_or_else(|| undecodable("missing JPEG header info".to_string()))?;
    let width = info.width as u32;
    let height = info.height as u32;

    let buffer_error = || undecodable("pixel buffer does not match dimensions".to_string());

    match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
        ColorSpace::RGB => RgbImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(buffer_error),
        ColorSpace::RGBA => RgbaImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(buffer_error),
        ColorSpace::Luma => GrayImage::from_raw(width, height, pixels)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(buffer_error),
        other => Err(undecodable(format!("unsupported colorspace {:?}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = ImageBuffer::from_fn(32, 24, |x, y| Rgb([(x * 8) as u8, (y * 10) as u8, 90]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn decodes_png_bytes() {
        let source = ImageSource::bytes("gradient.png", encoded(ImageFormat::Png));
        let image = StandardDecoder::new().decode(&source).unwrap();
        assert_eq!((image.width(), image.height()), (32, 24));
    }

    #[test]
    fn decodes_jpeg_bytes() {
        let bytes = encoded(ImageFormat::Jpeg);
        assert!(is_jpeg(&bytes));

        let image = StandardDecoder::new().decode(&bytes.into()).unwrap();
        assert_eq!((image.width(), image.height()), (32, 24));
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let source = ImageSource::bytes("empty", Vec::new());
        let result = StandardDecoder::new().decode(&source);
        assert!(matches!(result, Err(DecodeError::Empty { .. })));
    }

    #[test]
    fn garbage_is_undecodable() {
        let source = ImageSource::bytes("notes.txt", b"this is not a valid image file".to_vec());
        match StandardDecoder::new().decode(&source) {
            Err(DecodeError::Undecodable { source_name, .. }) => assert_eq!(source_name, "notes.txt"),
            other => panic!("Expected Undecodable, got {:?}", other.map(|i| (i.width(), i.height()))),
        }
    }

    #[test]
    fn truncated_jpeg_is_undecodable() {
        let source = ImageSource::bytes("broken.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        let result = StandardDecoder::new().decode(&source);
        assert!(matches!(result, Err(DecodeError::Undecodable { .. })));
    }

    #[test]
    fn missing_path_is_io_error() {
        let source = ImageSource::from(Path::new("/nonexistent/photo.jpg"));
        let result = StandardDecoder::new().decode(&source);
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }

    #[test]
    fn source_labels() {
        assert_eq!(ImageSource::from(PathBuf::from("/a/b.png")).label(), "/a/b.png");
        assert_eq!(ImageSource::from(vec![1, 2]).label(), "<memory>");
    }
}
