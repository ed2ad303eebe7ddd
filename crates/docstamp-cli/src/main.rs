mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docstamp", about = "Document provenance registry CLI")]
struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the wallet config file
    Init,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
    /// Compute a file's SHA-256 fingerprint locally
    Hash {
        file: PathBuf,
    },
    /// Pin a file to the storage network and print its URI
    Pin {
        file: PathBuf,
    },
    /// Register a file's fingerprint and storage URI on-chain
    Register {
        file: PathBuf,
        /// Use an existing storage URI instead of pinning
        #[arg(long)]
        uri: Option<String>,
    },
    /// Check whether a file's fingerprint is registered
    Verify {
        file: PathBuf,
    },
    /// List documents registered by the configured identity (on-chain)
    Docs,
    /// Show the local registration history
    History {
        /// Drop all local history entries
        #[arg(long)]
        clear: bool,
    },
    /// Report wallet, contract, and collaborator status
    Status,
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Set a config key
    Set { key: String, value: String },
    /// Print the current config (secrets masked)
    Show,
    /// Take the contract address from a deployment artifact
    Artifact { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);
    match cli.command {
        Cmd::Init => commands::init::run()?,
        Cmd::Config { action } => match action {
            ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
            ConfigCmd::Show => commands::config::show()?,
            ConfigCmd::Artifact { path } => commands::config::artifact(&path)?,
        },
        Cmd::Hash { file } => commands::hash::run(&file)?,
        Cmd::Pin { file } => commands::pin::run(&file).await?,
        Cmd::Register { file, uri } => commands::register::run(&file, uri).await?,
        Cmd::Verify { file } => commands::verify::run(&file).await?,
        Cmd::Docs => commands::docs::run().await?,
        Cmd::History { clear } => commands::history::run(clear)?,
        Cmd::Status => commands::status::run().await?,
    }
    Ok(())
}
