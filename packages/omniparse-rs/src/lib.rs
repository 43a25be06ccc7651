//! # omniparse-rs
//!
//! Locate UI elements in screenshots and turn them into click coordinates,
//! either as a library, through the `omniparse` CLI or over HTTP.
//!
//! ## Features
//!
//! - **Element detection**: an OmniParser model server when one is reachable at startup, otherwise a
//!   fallback that reports the screenshot as a single full-frame element
//! - **Selectors**: filter elements by exact type and text substring
//! - **Click points**: the center of a matched element's bounding box
//! - **HTTP service**: JSON endpoints for parsing, finding, clicking and file uploads
//!
//! ## Quick Start
//!
//! ```ignore
//! use omniparse_rs::prelude::*;
//! use std::sync::Arc;
//!
//! let locator = ElementLocator::new(Arc::new(DimensionDetector::new()));
//! let input = ImageInput::FilePath("screenshot.png".into());
//!
//! let buttons = locator.find(&input, &Selector::any().with_type("button").with_text("Submit")).await?;
//! if let Some(button) = buttons.first() {
//!     let point = ElementLocator::click_point(button)?;
//!     println!("click at {}, {}", point.x, point.y);
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;
pub mod server;

pub use config::ServiceConfig;
pub use observability::{init_logging, LogFormat};
pub use server::{build_router, serve, ApiError, AppState};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use omniparse_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{build_router, serve, AppState, ServiceConfig};
    pub use omniparse_detect::{
        select_detector, BackendKind, BoundingBox, ClickPoint, DetectError, Detector, DimensionDetector,
        Element, ElementLocator, ImageInput, OmniParserDetector, Screenshot, Selector,
    };
}
