//! docrelay binary entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docrelay::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "docrelay", version, about = "Signed document relay")]
struct Cli {
    /// Config file path (defaults to ~/.docrelay/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign and relay envelope files into the outbox.
    Send {
        /// Envelope files to relay.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Resolve recipient keys against the directory.
    Resolve {
        /// Recipient keys to look up.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the config file location.
    ConfigPath,
}

fn main() -> Result<()> {
    // .env is optional; absence is not an error.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Cli::parse();
    let config_path = args.config.clone().unwrap_or_else(Config::path);
    let config = Config::load(&config_path)?;

    match args.command {
        Command::Send { files } => cli::cmd_send(&config, &files),
        Command::Resolve { keys } => cli::cmd_resolve(&config, &keys),
        Command::ConfigPath => cli::cmd_config_path(),
    }
}
