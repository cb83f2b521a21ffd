use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use threat_feed::app::AppContext;
use threat_feed::cli::{commands, Cli, Commands};
use threat_feed::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries announcements only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Sources = cli.command {
        commands::list_sources();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::with_store_path(config, cli.store)?;

    match cli.command {
        Commands::Run { aliases, dry_run } => {
            commands::run(&ctx, &aliases, dry_run).await?;
        }
        Commands::Recon { path } => {
            commands::recon(&ctx, &path)?;
        }
        Commands::Sources => {}
    }

    Ok(())
}
