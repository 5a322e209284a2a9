use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fulfillment_core::{Config, FulfillmentService, Intent, provider::provider_from_config};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{info, warn};

use crate::{routes, state::AppState, telemetry::LogFormat};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-webhook", version, about = "Weather fulfillment webhook")]
pub struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, overriding the config file.
        #[arg(long)]
        host: Option<String>,

        /// Listen port, overriding the config file and $PORT.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Store the OpenWeatherMap API key in the config file.
    Configure,

    /// Print the weather reply for a city.
    Show {
        /// City name.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let mut config = Config::load(self.config.as_deref())?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                serve(config).await
            }
            Command::Configure => configure(self.config),
            Command::Show { city } => {
                let config = Config::load(self.config.as_deref())?;
                let provider = provider_from_config(&config)?;
                let service = FulfillmentService::new(provider, &config.webhook);

                let text = service.fulfill(Intent::GetWeather { city: Some(city) }).await;
                println!("{text}");
                Ok(())
            }
        }
    }
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    // Environment overrides are not applied, so they never end up on disk.
    let file = match path {
        Some(p) => p,
        None => Config::config_file_path()?,
    };
    let mut config = Config::load_file(&file)?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let written = config.save(Some(&file))?;
    println!("Saved configuration to {}", written.display());

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Weather webhook v{} starting", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(&config)?;
    let app = routes::create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        city_parameter = %config.webhook.city_parameter,
        details_mode = ?config.webhook.details_mode,
        "Listening for webhook requests on POST /webhook"
    );

    let shutdown = Arc::new(Notify::new());
    let notified = Arc::clone(&shutdown);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { notified.notified().await })
            .await
    });

    tokio::select! {
        res = &mut server => {
            res??;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    info!("Waiting up to {:?} for connections to close", timeout);
    shutdown.notify_one();

    match tokio::time::timeout(timeout, server).await {
        Ok(res) => res??,
        Err(_) => warn!("Shutdown timed out with requests still in flight"),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
