pub mod backend;
pub mod element;
pub mod engine;
pub mod fallback;
pub mod locator;
pub mod omniparser;

pub use backend::{select_detector, BackendKind};
pub use element::{BoundingBox, ClickPoint, Element, Selector, PARTIAL_BOX_DEFAULT};
pub use engine::{DetectError, Detector, ImageInput, Screenshot};
pub use fallback::DimensionDetector;
pub use locator::ElementLocator;
pub use omniparser::OmniParserDetector;
