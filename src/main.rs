mod cli;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use meetlight_core::config::Config;
use meetlight_core::display::DisplayAdapter;
use meetlight_core::poll::{PollLoop, PollSettings};
use meetlight_provider_google::{AppConfig, GoogleEventSource, Session, app_config, session};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const DEFAULT_LOG_FILTER: &str =
    "meetlight=info,meetlight_core=info,meetlight_provider_google=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Detect the display before authorizing so the strip is cleared on any exit
    let adapter = DisplayAdapter::new(sink::detect());
    info!(sink = adapter.sink_name(), "Display ready");

    let credentials_path = match cli.credentials.clone() {
        Some(path) => path,
        None => app_config::default_path()?,
    };
    let token_path = match cli.token.clone() {
        Some(path) => path,
        None => session::default_token_path()?,
    };

    let app = AppConfig::load(&credentials_path)?;
    let session = Session::obtain(app, &token_path)
        .await
        .context("Failed to obtain Google credentials")?;

    let settings = PollSettings {
        calendar_id: cli.calendar.clone(),
        policy: config.policy()?,
        query_delay: cli.query_delay(),
        lookahead: config.lookahead,
        brightness: cli.brightness,
    };

    info!(
        calendar = %settings.calendar_id,
        query_delay = ?settings.query_delay,
        "Watching calendar"
    );

    let mut poll = PollLoop::new(GoogleEventSource::new(session), adapter, settings);

    tokio::select! {
        result = poll.run() => result.context("Failed to update meeting status"),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
