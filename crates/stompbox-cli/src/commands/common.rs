//! Shared CLI helpers used across multiple commands.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use stompbox_client::BackendClient;
use stompbox_config::ClientConfig;

use crate::GlobalArgs;

/// Resolve configuration: file, then environment, then `--api-url`.
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<ClientConfig> {
    let config = ClientConfig::resolve(global.config.as_deref())?;
    let config = match &global.api_url {
        Some(url) => config.with_api_url(url.as_str())?,
        None => config,
    };
    tracing::debug!(api_url = config.api_url(), "configuration resolved");
    Ok(config)
}

/// Build a backend client from the resolved configuration.
pub fn backend(global: &GlobalArgs) -> anyhow::Result<(ClientConfig, BackendClient)> {
    let config = load_config(global)?;
    let client = BackendClient::from_config(&config);
    Ok((config, client))
}

/// A spinner on stderr for a wait of unknown length.
pub fn spinner(message: impl Into<String>) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]")?);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
