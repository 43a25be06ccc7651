//! HTTP facade over [`ElementLocator`].
//!
//! Every response carries `success`; failures add an `error` string and use
//! 400 for bad input, 404 when no element matches and 500 otherwise.
mod error;
mod router;
mod state;

use anyhow::{Context, Result};
use omniparse_detect::{select_detector, ElementLocator};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServiceConfig;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;

/// Picks the detection backend, binds and serves until Ctrl-C.
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let detector = select_detector(
        config.backend,
        config.omniparser_url.as_deref(),
        config.request_timeout,
    )
    .await
    .context("failed to initialise detection backend")?;
    let locator = ElementLocator::new(detector);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, backend = locator.backend(), "omniparse listening");

    let app = build_router(AppState::new(locator), config.max_body_bytes);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("omniparse stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
