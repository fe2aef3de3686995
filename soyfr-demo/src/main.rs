//! Terminal front end for the soyfr route dispatcher.

mod application;
mod component;
mod model;
mod pages;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use soyfr_router::{standard_dispatcher, MemoryHistory, NavConfig};

use crate::application::Application;

#[derive(Parser, Debug)]
#[command(name = "soyfr-demo", about = "Browse the soyfr routes in the terminal")]
struct Cli {
    /// Dispatcher configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location to open at startup; overrides `initial_path`.
    #[arg(short, long)]
    path: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soyfr_router=debug,soyfr_demo=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log) = &cli.log {
        init_logging(log)?;
    }

    let config = match &cli.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    let transition = config.transition()?;
    let initial = cli.path.clone().unwrap_or_else(|| config.initial_path.clone());

    tracing::info!(
        root = ?config.root,
        history = ?config.history,
        not_found = ?config.not_found,
        initial = %initial,
        "configuration loaded"
    );

    let dispatcher = standard_dispatcher(&config, MemoryHistory::new(initial))?;
    Application::new(dispatcher, transition).run().await
}
