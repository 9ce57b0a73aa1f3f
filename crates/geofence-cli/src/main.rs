//! Geofence CLI - inspect geofence files and replay visibility sessions.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use geofence::MapperConfig;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(file, config, json, cli.verbose),

        Commands::Template { output } => commands::template::run(output),

        Commands::Replay {
            file,
            actions,
            json,
        } => commands::replay::run(file, config, actions, json, cli.verbose),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "geofence=debug" } else { "geofence=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<MapperConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading mapper config");
            Ok(MapperConfig::load(path)?)
        }
        None => Ok(MapperConfig::default()),
    }
}
