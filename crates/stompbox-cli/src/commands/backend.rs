//! Backend status commands: `health` and `files`.

use stompbox_client::BackendMode;

use super::common;
use crate::GlobalArgs;

/// Probe the backend and print its mode.
///
/// Unlike a processing session, a failed probe is reported as an error here.
pub fn health(global: &GlobalArgs) -> anyhow::Result<()> {
    let (_, client) = common::backend(global)?;
    let mode = client.probe_mode()?;

    println!("Backend: {}", client.base_url());
    println!("Mode:    {mode}");
    match mode {
        BackendMode::Local => println!("Input:   files on the backend (see `stompbox files`)"),
        BackendMode::ObjectStorage => println!("Input:   uploads (use `stompbox process --upload`)"),
    }
    Ok(())
}

/// List the backend's input files.
pub fn files(global: &GlobalArgs) -> anyhow::Result<()> {
    let (_, client) = common::backend(global)?;
    let mode = client.probe_mode().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "capability probe failed, assuming local mode");
        BackendMode::Local
    });
    if mode == BackendMode::ObjectStorage {
        anyhow::bail!(
            "Backend at {} runs in s3 mode and has no input files; use `stompbox process --upload`",
            client.base_url()
        );
    }

    let files = client.list_input_files()?;
    if files.is_empty() {
        println!("No input files on the backend.");
        return Ok(());
    }

    println!("Input files ({}):", files.len());
    for name in &files {
        println!("  {name}");
    }
    Ok(())
}
