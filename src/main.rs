mod cli;
mod players;
mod store;
mod web;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command, ServiceConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match args.command {
        Command::Serve(serve_args) => {
            serve(serve_args).await?;
        }
        Command::Init(init_args) => {
            generate_sample_config(init_args)?;
        }
    }

    Ok(())
}

async fn serve(args: cli::ServeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading service config from {:?}", path);
            ServiceConfig::load(path)?
        }
        None => ServiceConfig::default(),
    };
    let config = config.with_overrides(&args);

    println!("\n{} listening on {}:{}", config.name, config.bind, config.port);
    println!("  GET    /rest/players          list (filters, pageNumber, pageSize, order)");
    println!("  GET    /rest/players/count    count (filters)");
    println!("  GET    /rest/players/:id      fetch one");
    println!("  POST   /rest/players          create");
    println!("  POST   /rest/players/:id      update");
    println!("  DELETE /rest/players/:id      delete\n");

    web::start_server(config).await
}

fn generate_sample_config(args: cli::InitArgs) -> Result<()> {
    let config = ServiceConfig::sample();

    config.save(&args.output)?;
    println!("Generated sample config at: {:?}", args.output);

    Ok(())
}
