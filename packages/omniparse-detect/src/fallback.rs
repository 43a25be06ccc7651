use async_trait::async_trait;

use crate::element::{BoundingBox, Element};
use crate::engine::{DetectError, Detector, Screenshot};

/// Backend used when no vision model is reachable: reports the image itself as
/// one element spanning the whole frame.
pub struct DimensionDetector;

impl DimensionDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DimensionDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Detector for DimensionDetector {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn detect(&self, screenshot: &Screenshot) -> Result<Vec<Element>, DetectError> {
        let (width, height) = (screenshot.width, screenshot.height);
        let element = Element::new("image", "")
            .with_bounding_box(BoundingBox::new(0.0, 0.0, f64::from(width), f64::from(height)))
            .with_attribute("width", width)
            .with_attribute("height", height);
        Ok(vec![element])
    }
}
