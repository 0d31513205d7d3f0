use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::DynamicImage;

use crate::error::{Result, SlideInsightError};
use crate::models::{ContentPart, ImageUrl};

/// A decoded slide image plus the base64 payload it was decoded from.
///
/// Keeping the original payload alongside the bitmap lets the generation
/// request re-use it without a lossy re-encode; round-tripping through this
/// type yields a byte-identical data URL.
#[derive(Debug, Clone)]
pub struct ImageResult {
    encoded: String,
    bitmap: DynamicImage,
}

impl ImageResult {
    /// Decode a base64 payload as returned by the similarity index.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| SlideInsightError::Retrieval(format!("invalid base64 image: {e}")))?;
        let bitmap = image::load_from_memory(&bytes)
            .map_err(|e| SlideInsightError::Retrieval(format!("undecodable slide image: {e}")))?;
        Ok(Self {
            encoded: encoded.to_string(),
            bitmap,
        })
    }

    /// The original base64 payload, unchanged.
    pub fn base64(&self) -> &str {
        &self.encoded
    }

    /// The decoded bitmap, for the display layer.
    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    /// Data URL for an image attachment in a multimodal request.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.encoded)
    }

    /// Wrap this image as a message content part.
    pub fn to_content_part(&self) -> ContentPart {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: self.data_url(),
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn tiny_png_base64() -> String {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([12, 200, 90]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode test png");
    BASE64.encode(&bytes)
}
