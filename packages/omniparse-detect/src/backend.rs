use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{DetectError, Detector};
use crate::fallback::DimensionDetector;
use crate::omniparser::OmniParserDetector;

/// Which detection backend to run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OmniParser when its server answers the startup probe, otherwise the fallback.
    #[default]
    Auto,
    /// OmniParser only; an unreachable server is a startup error.
    OmniParser,
    Fallback,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Auto => f.write_str("auto"),
            BackendKind::OmniParser => f.write_str("omniparser"),
            BackendKind::Fallback => f.write_str("fallback"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendKind::Auto),
            "omniparser" => Ok(BackendKind::OmniParser),
            "fallback" => Ok(BackendKind::Fallback),
            other => Err(format!("unknown backend '{other}' (expected auto, omniparser or fallback)")),
        }
    }
}

/// Resolves `kind` to a concrete detector. The OmniParser server, if any, is
/// probed exactly once here.
pub async fn select_detector(
    kind: BackendKind,
    omniparser_url: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn Detector>, DetectError> {
    match (kind, omniparser_url) {
        (BackendKind::Fallback, _) => Ok(Arc::new(DimensionDetector::new())),
        (BackendKind::OmniParser, None) => Err(DetectError::Backend(
            "the omniparser backend requires an OmniParser URL".into(),
        )),
        (BackendKind::OmniParser, Some(url)) => {
            let detector = OmniParserDetector::new(url, timeout)?;
            detector.probe().await?;
            info!(url = detector.base_url(), "using OmniParser backend");
            Ok(Arc::new(detector))
        }
        (BackendKind::Auto, None) => {
            info!("no OmniParser URL configured, using fallback backend");
            Ok(Arc::new(DimensionDetector::new()))
        }
        (BackendKind::Auto, Some(url)) => {
            let detector = OmniParserDetector::new(url, timeout)?;
            match detector.probe().await {
                Ok(()) => {
                    info!(url = detector.base_url(), "using OmniParser backend");
                    Ok(Arc::new(detector))
                }
                Err(e) => {
                    warn!(error = %e, "OmniParser not available, using fallback backend");
                    Ok(Arc::new(DimensionDetector::new()))
                }
            }
        }
    }
}
