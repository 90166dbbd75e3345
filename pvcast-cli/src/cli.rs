use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use pvcast_core::{AppState, Config, FetchOrchestrator, HeadlessMap, HttpBackend, ParsedCoordinate};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "pvcast", version, about = "Weekly weather and PV energy forecast for a coordinate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the weather service and the initial map center.
    Configure,

    /// Fetch and print the forecast and weekly summary for a coordinate.
    Show {
        /// Latitude in decimal degrees, e.g. 52.2297.
        #[arg(long, allow_hyphen_values = true)]
        latitude: String,

        /// Longitude in decimal degrees, e.g. 21.0122.
        #[arg(long, allow_hyphen_values = true)]
        longitude: String,

        /// Override the configured service URL.
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// Pick a coordinate by typing or "clicking" the map, then fetch.
    Interactive {
        /// Override the configured service URL.
        #[arg(long)]
        backend_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { latitude, longitude, backend_url } => {
                let config = load_config(backend_url.as_deref())?;
                let orchestrator = orchestrator(&config)?;

                let mut state = AppState::new(HeadlessMap::new(config.map_center()));
                state.set_latitude_text(latitude);
                state.set_longitude_text(longitude);
                let state = Mutex::new(state);

                orchestrator.run(&state).await;

                let state = state.lock().await;
                print!("{}", render::results(&state));
                if let Some(msg) = state.error_message() {
                    bail!("{msg}");
                }
                Ok(())
            }
            Command::Interactive { backend_url } => {
                let config = load_config(backend_url.as_deref())?;
                let orchestrator = orchestrator(&config)?;
                let state =
                    Arc::new(Mutex::new(AppState::new(HeadlessMap::new(config.map_center()))));

                interactive::run(&orchestrator, state).await
            }
        }
    }
}

fn load_config(backend_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = backend_url {
        config.set_backend_url(url)?;
    }
    tracing::debug!(backend_url = config.backend_url(), "configuration loaded");
    Ok(config)
}

fn orchestrator(config: &Config) -> anyhow::Result<FetchOrchestrator> {
    let backend = HttpBackend::from_config(config).context("Failed to build HTTP client")?;
    Ok(FetchOrchestrator::new(Arc::new(backend)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Weather service URL:")
        .with_default(config.backend_url())
        .prompt()?;
    config.set_backend_url(&url)?;

    let timeout = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    config.timeout_secs = Some(timeout);

    let center = config.map_center();
    let change_center = Confirm::new(&format!("Change the initial map center ({center})?"))
        .with_default(false)
        .prompt()?;
    if change_center {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_default(center.latitude)
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_default(center.longitude)
            .prompt()?;
        config.map_center = Some(ParsedCoordinate::new(latitude, longitude));
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
