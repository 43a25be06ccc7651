use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use image::ImageReader;
use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone)]
pub enum ImageInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

/// A screenshot that decoded successfully.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    /// The encoded image as it was supplied.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),
    #[error("could not decode image: {0}")]
    ImageDecode(String),
    #[error("element has no bounding box")]
    NoBoundingBox,
    #[error("detection backend error: {0}")]
    Backend(String),
}

impl ImageInput {
    /// Reads (for paths) and fully decodes the image.
    pub async fn load(&self) -> Result<Screenshot, DetectError> {
        let bytes = match self {
            ImageInput::FilePath(path) => tokio::fs::read(path)
                .await
                .map_err(|_| DetectError::ImageNotFound(path.clone()))?,
            ImageInput::Bytes(data) => data.clone(),
        };
        tokio::task::spawn_blocking(move || Screenshot::decode(bytes))
            .await
            .map_err(|e| DetectError::Backend(e.to_string()))?
    }
}

impl Screenshot {
    pub fn decode(bytes: Vec<u8>) -> Result<Self, DetectError> {
        let image = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| DetectError::ImageDecode(e.to_string()))?
            .decode()
            .map_err(|e| DetectError::ImageDecode(e.to_string()))?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            bytes,
        })
    }
}

/// A detection backend. Implementations are chosen once, at startup.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Short identifier reported by health checks and logs.
    fn name(&self) -> &'static str;

    async fn detect(&self, screenshot: &Screenshot) -> Result<Vec<Element>, DetectError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encoded(width, height, ImageFormat::Png)
    }

    pub fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{encoded, png_bytes};
    use super::*;
    use image::ImageFormat;

    #[tokio::test]
    async fn test_load_bytes() {
        let screenshot = ImageInput::Bytes(png_bytes(200, 100)).load().await.unwrap();
        assert_eq!((screenshot.width, screenshot.height), (200, 100));
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, png_bytes(32, 16)).unwrap();

        let screenshot = ImageInput::FilePath(path).load().await.unwrap();
        assert_eq!((screenshot.width, screenshot.height), (32, 16));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let path = PathBuf::from("/definitely/not/here.png");
        let err = ImageInput::FilePath(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, DetectError::ImageNotFound(p) if p == path));
    }

    #[tokio::test]
    async fn test_load_every_screenshot_format() {
        let formats = [
            ImageFormat::Png,
            ImageFormat::Jpeg,
            ImageFormat::Gif,
            ImageFormat::Bmp,
            ImageFormat::WebP,
            ImageFormat::Tiff,
        ];
        for format in formats {
            let screenshot = ImageInput::Bytes(encoded(3, 2, format))
                .load()
                .await
                .unwrap_or_else(|e| panic!("{format:?}: {e}"));
            assert_eq!((screenshot.width, screenshot.height), (3, 2), "{format:?}");
        }
    }

    #[tokio::test]
    async fn test_garbage_bytes() {
        let err = ImageInput::Bytes(b"not an image".to_vec()).load().await.unwrap_err();
        assert!(matches!(err, DetectError::ImageDecode(_)));
    }
}
