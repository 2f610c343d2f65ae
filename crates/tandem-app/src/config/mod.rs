use std::sync::Arc;

use clap::Parser;
pub use tandem_core::config::*;

use tandem_client::{HttpSchedulingApi, MemorySchedulingApi, SharedApi};

use crate::error::AppResult;

/// Command-line options. Anything given here wins over `tandem.toml` and the
/// environment.
#[derive(Debug, Parser)]
#[command(name = "tandem")]
#[command(about = "Terminal client for the tandem scheduling assistant")]
pub struct Cli {
    /// Base URL of the scheduling service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Work against an in-process store instead of the service
    #[arg(long)]
    pub offline: bool,

    /// Log filter, e.g. "info" or "tandem_service=debug"
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Folds the command-line overrides into `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.api.base_url.clone_from(base_url);
        }
        if self.offline {
            settings.api.backend = ApiBackend::Memory;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
    }
}

/// ## Summary
/// Builds the backend selected by `config`.
///
/// ## Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_api(config: &ApiConfig) -> AppResult<SharedApi> {
    Ok(match config.backend {
        ApiBackend::Http => {
            tracing::info!(base_url = %config.origin(), "Using scheduling service");
            Arc::new(HttpSchedulingApi::new(config)?)
        }
        ApiBackend::Memory => {
            tracing::info!("Using in-process store");
            Arc::new(MemorySchedulingApi::new())
        }
    })
}
