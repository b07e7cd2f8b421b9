//! `download-url` command.

use clap::Args;

use super::common;
use crate::GlobalArgs;

#[derive(Args)]
pub struct DownloadUrlArgs {
    /// Storage key, e.g. output/<id>.wav
    #[arg(value_name = "KEY")]
    key: String,
}

pub fn run(args: DownloadUrlArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let (_, client) = common::backend(global)?;
    let url = client.download_url(&args.key)?;
    println!("{url}");
    Ok(())
}
