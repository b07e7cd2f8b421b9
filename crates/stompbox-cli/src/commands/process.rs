//! Backend effect processing command.

use std::path::PathBuf;

use clap::Args;
use stompbox_chain::EffectRegistry;
use stompbox_client::{ProcessOutcome, ProcessResponse, ProcessingSession};

use super::common;
use crate::GlobalArgs;
use crate::chain_spec::{build_chain, parse_chain_spec};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input file already on the backend (local mode)
    #[arg(short, long, value_name = "NAME", conflicts_with = "upload")]
    input: Option<String>,

    /// Audio file to upload first (s3 mode)
    #[arg(short, long, value_name = "PATH")]
    upload: Option<PathBuf>,

    /// Effect chain specification (e.g., "Booster_Preamp:gain_db=8|Chorus|Delay:feedback=0.5")
    #[arg(short, long)]
    chain: String,

    /// Content type for the upload (defaults to the configured one)
    #[arg(long, value_name = "TYPE", requires = "upload")]
    content_type: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProcessArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    // Validate the chain before touching the network.
    let registry = EffectRegistry::new();
    let specs = parse_chain_spec(&args.chain)?;
    let chain = build_chain(&specs, &registry)?;
    if chain.enabled_count() == 0 {
        anyhow::bail!("No effects specified. Use --chain \"Name|Name:param=value\"");
    }

    let (config, client) = common::backend(global)?;
    let mut session = ProcessingSession::connect(&client);
    tracing::info!(mode = %session.mode(), "connected");

    if let Some(name) = &args.input {
        session.select_file(name)?;
    } else if let Some(path) = &args.upload {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid upload path: {}", path.display()))?
            .to_string();
        let content_type = args
            .content_type
            .as_deref()
            .unwrap_or(config.default_content_type.as_str());
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        let pb = common::spinner(format!("Uploading {filename} ({} bytes)...", bytes.len()))?;
        let uploaded = session.upload(&client, &filename, content_type, &bytes);
        pb.finish_and_clear();
        let key = uploaded?;
        eprintln!("Uploaded {filename} as {key}");
    } else {
        anyhow::bail!("No input specified. Use --input NAME or --upload PATH");
    }

    let Some(submission) = session.begin_submit(&chain)? else {
        anyhow::bail!("A submission is already in progress");
    };

    let pb = common::spinner(format!(
        "Processing with {} effect(s)...",
        submission.chain().len()
    ))?;
    let result = submission.send(&client);
    pb.finish_and_clear();
    let outcome = session.complete(result)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print_outcome(outcome, &registry);
    }
    Ok(())
}

fn print_outcome(outcome: &ProcessOutcome, registry: &EffectRegistry) {
    let applied: Vec<&str> = outcome
        .response
        .effects_applied()
        .iter()
        .map(|name| registry.display_name(name).unwrap_or(name.as_str()))
        .collect();

    println!("Applied: {}", applied.join(" -> "));
    match &outcome.response {
        ProcessResponse::Local(r) => println!("Output file: {}", r.output_file),
        ProcessResponse::ObjectStorage(r) => println!("Output key: {}", r.output_key),
    }
    println!();
    if let Some(input) = &outcome.playback.input {
        println!("  input:    {input}");
    }
    println!("  output:   {}", outcome.playback.output);
    println!("  download: {}", outcome.playback.download);
}
