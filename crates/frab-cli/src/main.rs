use anyhow::Context;
use clap::Parser;
use frab_config::FrabConfig;
use frab_db::FrabDb;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("frabsync error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = FrabConfig::load_with_dotenv().context("failed to load configuration")?;
    let db = FrabDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at '{}'", config.database.path))?;

    match &cli.command {
        cli::Commands::Event { action } => commands::event::handle(action, &db).await,
        cli::Commands::Refresh { slug } => commands::refresh::handle(&db, &config, slug).await,
        cli::Commands::Daemon { tick_secs } => {
            commands::daemon::handle(&db, &config, *tick_secs).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FRABSYNC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
