use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PLAYER-REGISTRY: game character records over HTTP
///
/// Serves create, read, update, delete, filter and paging operations for
/// player records under /rest/players.
#[derive(Parser, Debug)]
#[command(name = "player-registry")]
#[command(version = "0.1.0")]
#[command(about = "Manage game player records over a REST API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve(ServeArgs),

    /// Generate a sample service config file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the service config file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(long)]
    pub bind: Option<String>,

    /// JSON file of players to load at startup (overrides the config file)
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the config file
    #[arg(short, long, default_value = "player-registry.yaml")]
    pub output: PathBuf,
}
