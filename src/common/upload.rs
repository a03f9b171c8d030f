use crate::common::error::AppError;
use anyhow::anyhow;
use axum::extract::multipart::Field;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::{debug, error};

pub const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

/// An uploaded payload that decoded successfully as a raster image.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl UploadedImage {
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Buffers a multipart field, rejecting payloads over `max_bytes`.
pub async fn read_field(mut field: Field<'_>, max_bytes: usize) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Stream error: {}", e);
            AppError::validation("Upload stream interrupted")
        })?;

        if buffer.len() + chunk.len() > max_bytes {
            return Err(AppError::validation(format!(
                "Image exceeds the {} byte upload limit",
                max_bytes
            )));
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

/// Decodes `bytes` on the blocking pool so large images do not stall the runtime.
pub async fn decode_image(bytes: Bytes) -> Result<UploadedImage, AppError> {
    tokio::task::spawn_blocking(move || validate_image(bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Image decoder task failed: {}", e)))?
}

pub fn validate_image(bytes: Bytes) -> Result<UploadedImage, AppError> {
    if bytes.is_empty() {
        return Err(AppError::validation("The submitted file is empty."));
    }

    let reader = ImageReader::new(Cursor::new(&bytes[..]))
        .with_guessed_format()
        .map_err(|_| AppError::validation(INVALID_IMAGE))?;
    let format = reader
        .format()
        .ok_or_else(|| AppError::validation(INVALID_IMAGE))?;
    let decoded = reader.decode().map_err(|e| {
        debug!("Rejected {:?} upload: {}", format, e);
        AppError::validation(INVALID_IMAGE)
    })?;

    Ok(UploadedImage {
        width: decoded.width(),
        height: decoded.height(),
        format,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn encode(format: ImageFormat) -> Bytes {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(10, 10))
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap();
        Bytes::from(buf)
    }

    #[test]
    fn accepts_jpeg_and_png() {
        let jpeg = validate_image(encode(ImageFormat::Jpeg)).unwrap();
        assert_eq!(jpeg.format, ImageFormat::Jpeg);
        assert_eq!(jpeg.extension(), "jpg");
        assert_eq!(jpeg.content_type(), "image/jpeg");
        assert_eq!((jpeg.width, jpeg.height), (10, 10));

        let png = validate_image(encode(ImageFormat::Png)).unwrap();
        assert_eq!(png.extension(), "png");
    }

    #[test]
    fn rejects_text_payload() {
        let err = validate_image(Bytes::from_static(b"not image")).unwrap_err();
        assert_eq!(err.to_string(), INVALID_IMAGE);
    }

    #[test]
    fn rejects_truncated_image() {
        let png = encode(ImageFormat::Png);
        let truncated = png.slice(..png.len() / 2);
        assert!(matches!(
            validate_image(truncated),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(validate_image(Bytes::new()).is_err());
    }
}
