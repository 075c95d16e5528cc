//! Portrait embedding.
//!
//! Uploaded pictures are stored inline as `data:` URLs. Anything wider than
//! the configured limit is scaled down first, and everything is re-encoded
//! as JPEG.

use std::io::Cursor;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::imageops::FilterType;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Default widest portrait width, in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// JPEG quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 85;

/// Errors from the image collaborator.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes are not in a recognised image format.
    #[error("not an image")]
    NotAnImage,

    /// The image could not be decoded.
    #[error("could not decode image: {0}")]
    Decode(::image::ImageError),

    /// The image could not be re-encoded.
    #[error("could not encode image: {0}")]
    Encode(::image::ImageError),
}

/// Target size for an image of `width` by `height` so that it is at most
/// `max_width` wide, keeping the aspect ratio.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    let max_width = max_width.max(1);
    if width <= max_width {
        return (width, height);
    }
    let scaled = (u64::from(height) * u64::from(max_width) + u64::from(width) / 2) / u64::from(width);
    let scaled = u32::try_from(scaled).unwrap_or(height).max(1);
    (max_width, scaled)
}

/// Turn raw image bytes into a `data:image/jpeg;base64,...` reference.
pub fn embed_image(bytes: &[u8], max_width: u32) -> Result<String, ImageError> {
    ::image::guess_format(bytes).map_err(|_| ImageError::NotAnImage)?;
    let img = ::image::load_from_memory(bytes).map_err(ImageError::Decode)?;

    let (width, height) = scaled_dimensions(img.width(), img.height(), max_width);
    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        tracing::debug!(from = img.width(), to = width, "downscaling portrait");
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let rgb = img.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(ImageError::Encode)?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(buf.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn decode(url: &str) -> ::image::DynamicImage {
        let payload = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        ::image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn scaled_dimensions_keep_ratio() {
        assert_eq!(scaled_dimensions(1600, 400, 800), (800, 200));
        assert_eq!(scaled_dimensions(640, 480, 800), (640, 480));
        assert_eq!(scaled_dimensions(5000, 1, 800), (800, 1));
    }

    #[test]
    fn wide_images_are_downscaled() {
        let url = embed_image(&png(1600, 400), 800).unwrap();
        let img = decode(&url);
        assert_eq!((img.width(), img.height()), (800, 200));
    }

    #[test]
    fn small_images_keep_size() {
        let url = embed_image(&png(64, 32), 800).unwrap();
        let img = decode(&url);
        assert_eq!((img.width(), img.height()), (64, 32));
    }

    #[test]
    fn non_image_is_rejected() {
        let err = embed_image(b"definitely not a picture", 800).unwrap_err();
        assert!(matches!(err, ImageError::NotAnImage));
    }
}
