mod aerofoil;
mod app;
mod camera;
mod config;
mod error;
mod graphics;
mod hud;
mod input;
mod math;
mod mesh;
mod model;
mod scene;
mod state;
mod terminal;
mod track;
mod vertex;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, ViewerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the renderer
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ViewerConfig::from(Cli::parse());
    app::run(config).context("f1viewer failed")?;
    tracing::info!("viewer closed");
    Ok(())
}
