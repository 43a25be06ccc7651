use std::path::PathBuf;

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use omniparse_detect::{ClickPoint, Element, ElementLocator, ImageInput, Selector};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Multipart field names accepted by `/upload`; `file` is what browser form clients send.
const UPLOAD_FIELDS: &[&str] = &["screenshot", "file"];

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/parse_screenshot", post(parse_screenshot_handler))
        .route("/upload", post(upload_handler))
        .route("/find_elements", post(find_elements_handler))
        .route("/interact", post(interact_handler))
        .route("/click_point", post(click_point_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Where the screenshot comes from. Exactly one field must be set.
#[derive(Debug, Default, Deserialize)]
struct ScreenshotSource {
    #[serde(default)]
    screenshot_path: Option<PathBuf>,
    #[serde(default)]
    screenshot_base64: Option<String>,
}

impl ScreenshotSource {
    fn into_input(self) -> ApiResult<ImageInput> {
        match (self.screenshot_path, self.screenshot_base64) {
            (Some(path), None) if !path.as_os_str().is_empty() => Ok(ImageInput::FilePath(path)),
            (None, Some(encoded)) => Base64
                .decode(encoded.trim())
                .map(ImageInput::Bytes)
                .map_err(|e| ApiError::BadRequest(format!("screenshot_base64 is not valid base64: {e}"))),
            (Some(_), Some(_)) => Err(ApiError::BadRequest(
                "Provide either screenshot_path or screenshot_base64, not both".into(),
            )),
            _ => Err(ApiError::BadRequest("screenshot_path is required".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindRequest {
    #[serde(flatten)]
    source: ScreenshotSource,
    #[serde(default)]
    element_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InteractRequest {
    #[serde(flatten)]
    source: ScreenshotSource,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    selector: Selector,
}

#[derive(Debug, Deserialize)]
struct ClickPointRequest {
    element: Element,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

#[derive(Serialize)]
struct ElementsResponse {
    success: bool,
    elements: Vec<Element>,
}

#[derive(Serialize)]
struct InteractResponse {
    success: bool,
    result: ClickPoint,
}

#[derive(Serialize)]
struct CoordinatesResponse {
    success: bool,
    coordinates: ClickPoint,
}

/// Blank selector fields from form-style clients mean "any".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend: state.locator.backend(),
    })
}

#[instrument(name = "omniparse.parse", skip_all)]
async fn parse_screenshot_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScreenshotSource>, JsonRejection>,
) -> ApiResult<Json<ElementsResponse>> {
    let Json(source) = payload?;
    let elements = state.locator.detect(&source.into_input()?).await?;
    Ok(Json(ElementsResponse {
        success: true,
        elements,
    }))
}

#[instrument(name = "omniparse.upload", skip_all)]
async fn upload_handler(
    State(state): State<AppState>,
    payload: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ElementsResponse>> {
    let mut multipart = payload?;
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name().is_some_and(|name| UPLOAD_FIELDS.contains(&name)) {
            upload = Some(field.bytes().await?.to_vec());
            break;
        }
    }
    let bytes = upload.ok_or_else(|| ApiError::BadRequest("No screenshot file uploaded".into()))?;
    debug!(size = bytes.len(), "received upload");

    let elements = state.locator.detect(&ImageInput::Bytes(bytes)).await?;
    Ok(Json(ElementsResponse {
        success: true,
        elements,
    }))
}

#[instrument(name = "omniparse.find", skip_all)]
async fn find_elements_handler(
    State(state): State<AppState>,
    payload: Result<Json<FindRequest>, JsonRejection>,
) -> ApiResult<Json<ElementsResponse>> {
    let Json(req) = payload?;
    let selector = Selector {
        kind: non_blank(req.element_type),
        text: non_blank(req.text),
    };
    let elements = state.locator.find(&req.source.into_input()?, &selector).await?;
    if elements.is_empty() {
        return Err(ApiError::NoMatch);
    }
    Ok(Json(ElementsResponse {
        success: true,
        elements,
    }))
}

#[instrument(name = "omniparse.interact", skip_all)]
async fn interact_handler(
    State(state): State<AppState>,
    payload: Result<Json<InteractRequest>, JsonRejection>,
) -> ApiResult<Json<InteractResponse>> {
    let Json(req) = payload?;
    match req.action.as_deref() {
        Some("click") => {}
        Some(other) => return Err(ApiError::BadRequest(format!("Unsupported action: {other}"))),
        None => return Err(ApiError::BadRequest("action is required".into())),
    }
    let selector = Selector {
        kind: non_blank(req.selector.kind),
        text: non_blank(req.selector.text),
    };

    let matches = state.locator.find(&req.source.into_input()?, &selector).await?;
    let target = matches.first().ok_or(ApiError::NoMatch)?;
    let result = ElementLocator::click_point(target)?;
    Ok(Json(InteractResponse {
        success: true,
        result,
    }))
}

async fn click_point_handler(
    payload: Result<Json<ClickPointRequest>, JsonRejection>,
) -> ApiResult<Json<CoordinatesResponse>> {
    let Json(req) = payload?;
    let coordinates = ElementLocator::click_point(&req.element)?;
    Ok(Json(CoordinatesResponse {
        success: true,
        coordinates,
    }))
}
