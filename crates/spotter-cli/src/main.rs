//! Spotter CLI - rank powerlifters within filtered cohorts.

use clap::Parser;
use spotter_cli::commands;
use spotter_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Diagnostics on stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> spotter_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        cmd => {
            let service = commands::open_service(&config)?;
            match cmd {
                Command::Rank(args) => commands::execute_rank(args, &service, &formatter).await?,
                Command::Manual(args) => commands::execute_manual(args, &service, &formatter).await?,
                Command::Bests(args) => commands::execute_bests(args, &service, &formatter).await?,
                Command::Details(args) => commands::execute_details(args, &service, &formatter).await?,
                Command::Profile(_) => unreachable!(),
            }
        }
    }

    Ok(())
}
