use std::sync::Arc;

use tracing::debug;

use crate::element::{ClickPoint, Element, Selector};
use crate::engine::{DetectError, Detector, ImageInput};

/// Finds UI elements in screenshots using one detector fixed at construction.
///
/// Cloning is cheap and clones share the detector; the locator itself holds no
/// per-call state.
#[derive(Clone)]
pub struct ElementLocator {
    detector: Arc<dyn Detector>,
}

impl ElementLocator {
    pub fn new(detector: Arc<dyn Detector>) -> Self {
        Self { detector }
    }

    pub fn backend(&self) -> &'static str {
        self.detector.name()
    }

    pub async fn detect(&self, input: &ImageInput) -> Result<Vec<Element>, DetectError> {
        let screenshot = input.load().await?;
        let elements = self.detector.detect(&screenshot).await?;
        debug!(
            backend = self.detector.name(),
            width = screenshot.width,
            height = screenshot.height,
            count = elements.len(),
            "detected elements"
        );
        Ok(elements)
    }

    /// Detected elements matching `selector`, in detection order. No match is
    /// an empty vector rather than an error.
    pub async fn find(&self, input: &ImageInput, selector: &Selector) -> Result<Vec<Element>, DetectError> {
        let mut elements = self.detect(input).await?;
        elements.retain(|element| selector.matches(element));
        Ok(elements)
    }

    pub fn click_point(element: &Element) -> Result<ClickPoint, DetectError> {
        element.click_point()
    }
}
