//! Dispatcher - Concurrent classification, sequential launching
//!
//! One task is spawned per token. Each task classifies its own token, resolves
//! the destination URL and publishes a single [`DispatchResult`] into a bounded
//! channel sized to the token count, so no send ever waits for space.
//!
//! The dispatcher performs exactly one receive per token and runs the launcher
//! for each result before receiving the next one. Results arrive in completion
//! order, not input order; the index is carried for diagnostics only.
//!
//! There is no timeout: a launcher call that hangs blocks every launch after it.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::backends::browser::{
    error_chain, BrowserLauncher, DryRunLauncher, LaunchError, SystemLauncher,
};
use crate::core::classify::classify;
use crate::core::config::{Config, Destinations};
use crate::core::model::{DispatchRecord, DispatchReport, DispatchResult};

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Every sender is gone before all results arrived (a task panicked)
    #[error("result channel closed after {received} of {expected} results")]
    ChannelClosed { received: usize, expected: usize },

    /// Launch failure in fail-fast mode
    #[error("failed to open {url} for token '{token}' (#{index})")]
    Launch {
        index: usize,
        token: String,
        url: String,
        #[source]
        source: LaunchError,
    },
}

/// Classify one token and resolve its URL
pub fn resolve(index: usize, token: String, destinations: &Destinations) -> DispatchResult {
    let classification = classify(&token);
    let kind = classification.kind();
    let url = destinations.url_for(&classification);

    tracing::debug!(index, token = %token, kind = %kind, url = %url, "classified token");

    DispatchResult {
        index,
        token,
        kind,
        url,
    }
}

pub struct Dispatcher {
    destinations: Arc<Destinations>,
    fail_fast: bool,
    launcher: Arc<dyn BrowserLauncher>,
}

impl Dispatcher {
    pub fn new(config: &Config, launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            destinations: Arc::new(config.destinations.clone()),
            fail_fast: config.fail_fast,
            launcher,
        }
    }

    /// Dispatcher with the launcher implied by the config: dry run in debug
    /// mode, the OS opener otherwise.
    pub fn from_config(config: &Config) -> Self {
        let launcher: Arc<dyn BrowserLauncher> = if config.debug {
            Arc::new(DryRunLauncher)
        } else {
            Arc::new(SystemLauncher::new())
        };
        Self::new(config, launcher)
    }

    /// Classify every token concurrently and launch each resolved URL.
    ///
    /// Launch failures are recorded in the report and processing continues,
    /// unless fail-fast is set, in which case the first failure is returned.
    pub async fn dispatch(&self, tokens: Vec<String>) -> Result<DispatchReport, DispatchError> {
        let expected = tokens.len();
        let mut report = DispatchReport::new();
        if expected == 0 {
            return Ok(report);
        }

        let (tx, mut rx) = mpsc::channel::<DispatchResult>(expected);

        for (index, token) in tokens.into_iter().enumerate() {
            tracing::debug!(index, token = %token, "spawning classification task");

            let tx = tx.clone();
            let destinations = Arc::clone(&self.destinations);
            tokio::spawn(async move {
                let result = resolve(index, token, &destinations);
                // Receiver only goes away when the dispatcher bails out early
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        for received in 0..expected {
            let result = rx
                .recv()
                .await
                .ok_or(DispatchError::ChannelClosed { received, expected })?;

            match self.launcher.open(&result.url) {
                Ok(status) => report.push(DispatchRecord::new(result, status)),
                Err(source) => {
                    tracing::error!(
                        index = result.index,
                        token = %result.token,
                        url = %result.url,
                        os = std::env::consts::OS,
                        error = %error_chain(&source),
                        "failed to open URL"
                    );

                    if self.fail_fast {
                        return Err(DispatchError::Launch {
                            index: result.index,
                            token: result.token,
                            url: result.url,
                            source,
                        });
                    }
                    report.push(DispatchRecord::failed(result, error_chain(&source)));
                }
            }
        }

        tracing::info!(
            total = expected,
            failed = report.failures().count(),
            "dispatch finished"
        );
        Ok(report)
    }
}
