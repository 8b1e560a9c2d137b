//! OAuth client secrets for the Google provider.
//!
//! Read from the `credentials.json` file downloaded from the Google Cloud
//! console, by default at:
//!   ~/.config/meetlight/credentials.json

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Google OAuth client credentials (user-provided).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// The console wraps the secrets in "installed" or "web" depending on the
/// client type. A flat object is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClientSecretsFile {
    Installed { installed: AppConfig },
    Web { web: AppConfig },
    Flat(AppConfig),
}

impl From<ClientSecretsFile> for AppConfig {
    fn from(file: ClientSecretsFile) -> Self {
        match file {
            ClientSecretsFile::Installed { installed } => installed,
            ClientSecretsFile::Web { web } => web,
            ClientSecretsFile::Flat(config) => config,
        }
    }
}

pub fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("meetlight"))
}

pub fn default_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("credentials.json"))
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Google credentials not found.\n\n\
                Download the OAuth client secrets of a \"Desktop app\" client from\n\
                https://console.cloud.google.com/apis/credentials\n\
                and save them as {}",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let file: ClientSecretsFile = serde_json::from_str(contents)?;
        let config = AppConfig::from(file);

        if config.client_id.is_empty() || config.client_secret.is_empty() {
            anyhow::bail!("client_id and client_secret must not be empty");
        }

        Ok(config)
    }
}
