use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use meetlight_core::display::DEFAULT_BRIGHTNESS;

#[derive(Parser, Debug)]
#[command(name = "meetlight")]
#[command(about = "Show your Google Calendar meeting status on an RGB LED strip")]
pub struct Cli {
    /// Calendar id to use for meeting status (e.g. "primary" or an email address)
    pub calendar: String,

    /// Brightness of the LED strip (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS)]
    pub brightness: f32,

    /// Delay between querying the calendar, in seconds
    #[arg(long, default_value_t = 10)]
    pub query_delay: u64,

    /// Config file (defaults to ~/.config/meetlight/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Google OAuth client secrets (defaults to ~/.config/meetlight/credentials.json)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Cached OAuth tokens (defaults to ~/.config/meetlight/token.toml)
    #[arg(long)]
    pub token: Option<PathBuf>,
}

impl Cli {
    pub fn query_delay(&self) -> Duration {
        Duration::from_secs(self.query_delay)
    }
}
