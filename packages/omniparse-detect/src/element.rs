//! Detected UI elements and the queries run against them.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::engine::DetectError;

/// Default corners used when a bounding box arrives with some coordinates missing.
pub const PARTIAL_BOX_DEFAULT: BoundingBox = BoundingBox {
    x1: 0.0,
    y1: 0.0,
    x2: 100.0,
    y2: 100.0,
};

/// Axis-aligned box in pixel units, origin at the top-left corner.
///
/// Always satisfies `x1 <= x2` and `y1 <= y2`; inverted input is swapped on
/// construction. Deserializing a box with missing fields fills each one from
/// [`PARTIAL_BOX_DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialBoundingBox")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> ClickPoint {
        ClickPoint {
            x: (self.x1 + self.x2) / 2.0,
            y: (self.y1 + self.y2) / 2.0,
        }
    }
}

#[derive(Deserialize)]
struct PartialBoundingBox {
    #[serde(default)]
    x1: Option<f64>,
    #[serde(default)]
    y1: Option<f64>,
    #[serde(default)]
    x2: Option<f64>,
    #[serde(default)]
    y2: Option<f64>,
}

impl From<PartialBoundingBox> for BoundingBox {
    fn from(raw: PartialBoundingBox) -> Self {
        let d = PARTIAL_BOX_DEFAULT;
        BoundingBox::new(
            raw.x1.unwrap_or(d.x1),
            raw.y1.unwrap_or(d.y1),
            raw.x2.unwrap_or(d.x2),
            raw.y2.unwrap_or(d.y2),
        )
    }
}

/// Center of an element, in the same pixel space as its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    pub x: f64,
    pub y: f64,
}

/// A detected UI region. Both backends produce this same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Map<String, Value>,
}

impl Element {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            bounding_box: None,
            attributes: Map::new(),
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Midpoint of the bounding box.
    pub fn click_point(&self) -> Result<ClickPoint, DetectError> {
        self.bounding_box
            .as_ref()
            .map(BoundingBox::center)
            .ok_or(DetectError::NoBoundingBox)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Partial-match query over element type and text. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Selector {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Type must be equal; text only has to appear somewhere in the element text.
    pub fn matches(&self, element: &Element) -> bool {
        let kind_ok = self.kind.as_deref().map_or(true, |k| element.kind == k);
        let text_ok = self
            .text
            .as_deref()
            .map_or(true, |t| element.text.contains(t));
        kind_ok && text_ok
    }
}
