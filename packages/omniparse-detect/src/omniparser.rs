//! Client for an OmniParser model server.
//!
//! The server exposes `GET /health` and `POST /parse`. The parse call takes the
//! encoded screenshot as base64 and answers with the element list in the same
//! JSON shape this crate serializes [`Element`] to.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::element::Element;
use crate::engine::{DetectError, Detector, Screenshot};

#[derive(Serialize)]
struct ParseRequest<'a> {
    image_base64: &'a str,
}

#[derive(Deserialize)]
struct ParseResponse {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

pub struct OmniParserDetector {
    client: reqwest::Client,
    base_url: String,
}

impl OmniParserDetector {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DetectError::Backend(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the model server answers its health endpoint.
    pub async fn probe(&self) -> Result<(), DetectError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DetectError::Backend(format!("OmniParser unreachable at {url}: {e}")))?;
        if !response.status().is_success() {
            return Err(DetectError::Backend(format!(
                "OmniParser health check at {url} returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Detector for OmniParserDetector {
    fn name(&self) -> &'static str {
        "omniparser"
    }

    #[instrument(name = "omniparser.detect", skip_all, fields(width = screenshot.width, height = screenshot.height))]
    async fn detect(&self, screenshot: &Screenshot) -> Result<Vec<Element>, DetectError> {
        let encoded = Base64.encode(&screenshot.bytes);
        let response = self
            .client
            .post(format!("{}/parse", self.base_url))
            .json(&ParseRequest {
                image_base64: &encoded,
            })
            .send()
            .await
            .map_err(|e| DetectError::Backend(e.to_string()))?;

        let status = response.status();
        let body: ParseResponse = response
            .json()
            .await
            .map_err(|e| DetectError::Backend(format!("invalid OmniParser response ({status}): {e}")))?;

        if !status.is_success() || !body.success {
            let reason = body.error.unwrap_or_else(|| format!("status {status}"));
            return Err(DetectError::Backend(reason));
        }

        debug!(count = body.elements.len(), "OmniParser returned elements");
        Ok(body.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BoundingBox;
    use crate::engine::test_support::png_bytes;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn detector(server: &MockServer) -> OmniParserDetector {
        OmniParserDetector::new(format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_probe_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
            .mount(&server)
            .await;

        assert!(detector(&server).probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_probe_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(matches!(detector(&server).probe().await, Err(DetectError::Backend(_))));
    }

    #[tokio::test]
    async fn test_detect_parses_elements() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "elements": [
                    {
                        "type": "button",
                        "text": "Submit Order",
                        "bounding_box": { "x1": 10, "y1": 20, "x2": 110, "y2": 60 },
                        "attributes": { "confidence": 0.93 }
                    },
                    { "type": "text", "text": "Total: $10", "bounding_box": null, "attributes": {} }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let screenshot = Screenshot::decode(png_bytes(4, 4)).unwrap();
        let elements = detector(&server).detect(&screenshot).await.unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind, "button");
        assert_eq!(elements[0].bounding_box, Some(BoundingBox::new(10.0, 20.0, 110.0, 60.0)));
        assert_eq!(elements[1].bounding_box, None);
    }

    #[tokio::test]
    async fn test_detect_reports_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "model crashed"
            })))
            .mount(&server)
            .await;

        let screenshot = Screenshot::decode(png_bytes(4, 4)).unwrap();
        let err = detector(&server).detect(&screenshot).await.unwrap_err();
        assert!(matches!(err, DetectError::Backend(msg) if msg == "model crashed"));
    }
}
