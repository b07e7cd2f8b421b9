//! Stompbox CLI - command-line client for the stompbox audio-effects backend.

mod chain_spec;
mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stompbox")]
#[command(author, version, about = "Stompbox effect-chain client", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base URL (overrides config file and STOMPBOX_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the effect catalog, or show one effect's parameters
    Effects(commands::effects::EffectsArgs),

    /// Probe the backend and report its mode
    Health,

    /// List input files on a local-mode backend
    Files,

    /// Run an effect chain over an input file
    Process(commands::process::ProcessArgs),

    /// Get a fresh download link for a stored object
    DownloadUrl(commands::download::DownloadUrlArgs),

    /// Show or initialize the client configuration
    Config(commands::config::ConfigArgs),
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v; ureq logs through the `log` facade.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match cli.command {
        Commands::Effects(args) => commands::effects::run(args, &cli.global),
        Commands::Health => commands::backend::health(&cli.global),
        Commands::Files => commands::backend::files(&cli.global),
        Commands::Process(args) => commands::process::run(args, &cli.global),
        Commands::DownloadUrl(args) => commands::download::run(args, &cli.global),
        Commands::Config(args) => commands::config::run(args, &cli.global),
    }
}
