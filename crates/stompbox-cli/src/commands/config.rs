//! Configuration display and initialization.

use clap::Args;
use stompbox_config::{API_URL_ENV, ClientConfig, ensure_user_config_dir, user_config_path};

use super::common;
use crate::GlobalArgs;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write a default config file to the user config directory
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    if args.init {
        return init(args.force);
    }

    let config = common::load_config(global)?;
    let source = match &global.config {
        Some(path) => path.display().to_string(),
        None => {
            let path = user_config_path();
            if path.is_file() {
                path.display().to_string()
            } else {
                format!("defaults (no file at {})", path.display())
            }
        }
    };

    println!("# Source: {source}");
    if std::env::var(API_URL_ENV).is_ok() {
        println!("# {API_URL_ENV} is set");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

fn init(force: bool) -> anyhow::Result<()> {
    let path = user_config_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    ensure_user_config_dir()?;
    ClientConfig::default().save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
