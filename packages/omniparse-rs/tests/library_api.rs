//! Integration tests for the omniparse-rs library API

use std::sync::Arc;

#[test]
fn test_prelude_imports() {
    use omniparse_rs::prelude::*;

    let element = Element::new("button", "Submit Order").with_bounding_box(BoundingBox::new(0.0, 0.0, 10.0, 20.0));
    assert!(Selector::any().with_type("button").with_text("Submit").matches(&element));
    assert_eq!(ElementLocator::click_point(&element).unwrap(), ClickPoint { x: 5.0, y: 10.0 });

    let bare = Element::new("text", "no box");
    assert!(matches!(ElementLocator::click_point(&bare), Err(DetectError::NoBoundingBox)));
}

#[test]
fn test_service_config_defaults() {
    use omniparse_rs::ServiceConfig;

    let config = ServiceConfig::default();
    assert_eq!(config.port, 5000);
    assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:5000");
}

#[tokio::test]
async fn test_locator_with_fallback_detector() {
    use omniparse_rs::prelude::*;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot.png");
    image::RgbaImage::new(64, 48).save(&path).unwrap();

    let locator = ElementLocator::new(Arc::new(DimensionDetector::new()));
    let input = ImageInput::FilePath(path);

    let detected = locator.detect(&input).await.unwrap();
    let found = locator.find(&input, &Selector::any()).await.unwrap();
    assert_eq!(detected, found);
    assert_eq!(detected[0].bounding_box, Some(BoundingBox::new(0.0, 0.0, 64.0, 48.0)));
}
