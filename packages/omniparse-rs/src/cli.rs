//! Command line arguments backing the `omniparse` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use omniparse_detect::{BackendKind, Selector};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::observability::LogFormat;

/// Upper bound for `--max-upload-mb`.
pub const MAX_UPLOAD_MB: u64 = 4096;

#[derive(Parser, Debug)]
#[command(
  name = "omniparse",
  about = "Locate UI elements in screenshots and compute click coordinates",
  version
)]
pub struct Args {
  /// Log encoding written to stderr
  #[arg(long, global = true, env = "OMNIPARSE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
  pub log_format: LogFormat,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Run the HTTP service
  Serve(ServeArgs),
  /// Print every element detected in a screenshot as JSON
  Detect {
    /// Screenshot to parse
    path: PathBuf,

    #[command(flatten)]
    backend: BackendArgs,
  },
  /// Print the elements matching a selector as JSON
  Find {
    /// Screenshot to parse
    path: PathBuf,

    #[command(flatten)]
    selector: SelectorArgs,

    #[command(flatten)]
    backend: BackendArgs,
  },
  /// Print the click coordinates of the first element matching a selector
  Click {
    /// Screenshot to parse
    path: PathBuf,

    #[command(flatten)]
    selector: SelectorArgs,

    #[command(flatten)]
    backend: BackendArgs,
  },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BackendArgs {
  /// Detection backend: auto, omniparser or fallback
  #[arg(long, env = "OMNIPARSE_BACKEND", default_value_t = BackendKind::Auto)]
  pub backend: BackendKind,

  /// Base URL of the OmniParser model server
  #[arg(long, env = "OMNIPARSER_URL")]
  pub omniparser_url: Option<String>,

  /// Timeout for each OmniParser request, in seconds
  #[arg(
    long,
    env = "OMNIPARSE_TIMEOUT_SECS",
    default_value = "30",
    value_parser = clap::value_parser!(u64).range(1..)
  )]
  pub timeout_secs: u64,
}

impl BackendArgs {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SelectorArgs {
  /// Exact element type to match, e.g. `button`
  #[arg(long = "type", short = 't')]
  pub element_type: Option<String>,

  /// Text the element must contain
  #[arg(long)]
  pub text: Option<String>,
}

impl SelectorArgs {
  pub fn selector(&self) -> Selector {
    Selector {
      kind: self.element_type.clone(),
      text: self.text.clone(),
    }
  }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
  /// Address to bind
  #[arg(long, env = "OMNIPARSE_HOST", default_value = "0.0.0.0")]
  pub host: String,

  /// Port to listen on
  #[arg(long, short = 'p', env = "PORT", default_value = "5000")]
  pub port: u16,

  /// Largest accepted request body, in megabytes
  #[arg(
    long,
    env = "OMNIPARSE_MAX_UPLOAD_MB",
    default_value = "16",
    value_parser = clap::value_parser!(u64).range(1..=MAX_UPLOAD_MB)
  )]
  pub max_upload_mb: u64,

  #[command(flatten)]
  pub backend: BackendArgs,
}

impl ServeArgs {
  pub fn into_config(self) -> ServiceConfig {
    ServiceConfig {
      host: self.host,
      port: self.port,
      backend: self.backend.backend,
      omniparser_url: self.backend.omniparser_url.clone(),
      request_timeout: self.backend.timeout(),
      max_body_bytes: usize::try_from(self.max_upload_mb)
        .unwrap_or(usize::MAX)
        .saturating_mul(1024 * 1024),
    }
  }
}
