//! One-shot CLI commands. Each prints JSON to stdout.
use std::path::PathBuf;

use anyhow::{Context, Result};
use omniparse_detect::{select_detector, ElementLocator, ImageInput};

use crate::cli::{BackendArgs, SelectorArgs};

/// Outcome of a command that can legitimately find nothing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    NoMatch,
}

async fn locator(backend: &BackendArgs) -> Result<ElementLocator> {
    let detector = select_detector(backend.backend, backend.omniparser_url.as_deref(), backend.timeout())
        .await
        .context("failed to initialise detection backend")?;
    Ok(ElementLocator::new(detector))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn detect(path: PathBuf, backend: &BackendArgs) -> Result<CommandStatus> {
    let elements = locator(backend).await?.detect(&ImageInput::FilePath(path)).await?;
    print_json(&elements)?;
    Ok(CommandStatus::Done)
}

pub async fn find(path: PathBuf, selector: &SelectorArgs, backend: &BackendArgs) -> Result<CommandStatus> {
    let elements = locator(backend)
        .await?
        .find(&ImageInput::FilePath(path), &selector.selector())
        .await?;
    if elements.is_empty() {
        return Ok(CommandStatus::NoMatch);
    }
    print_json(&elements)?;
    Ok(CommandStatus::Done)
}

pub async fn click(path: PathBuf, selector: &SelectorArgs, backend: &BackendArgs) -> Result<CommandStatus> {
    let elements = locator(backend)
        .await?
        .find(&ImageInput::FilePath(path), &selector.selector())
        .await?;
    let Some(target) = elements.first() else {
        return Ok(CommandStatus::NoMatch);
    };
    let point = ElementLocator::click_point(target)
        .with_context(|| format!("matched '{}' element has no bounding box", target.kind))?;
    print_json(&point)?;
    Ok(CommandStatus::Done)
}
