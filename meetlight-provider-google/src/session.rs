//! Creates a valid Google session (access token) that we can use to call the gcal API.
//!
//! Tokens are cached on disk, by default at:
//!   ~/.config/meetlight/token.toml

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app_config::{AppConfig, base_dir};
use crate::authenticate;

/// Refresh tokens slightly before Google considers them expired
const EXPIRY_MARGIN_SECS: i64 = 60;

pub fn default_token_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("token.toml"))
}

/// An authorized Google session: client secrets plus cached tokens.
pub struct Session {
    app: AppConfig,
    path: PathBuf,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        SessionData::from_tokens(
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
            tokens.expires_in,
        )
    }
}

impl SessionData {
    pub fn from_tokens(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        SessionData {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Expired tokens without a refresh token can only be replaced by
    /// asking the user again.
    fn needs_consent_at(&self, now: DateTime<Utc>) -> bool {
        self.is_expired_at(now) && self.refresh_token.is_empty()
    }
}

impl Session {
    /// Load cached tokens from `path`, or run the consent flow when there
    /// are none (or they can no longer be refreshed), refreshing expired
    /// tokens either way.
    pub async fn obtain(app: AppConfig, path: &Path) -> Result<Self> {
        let mut session = if path.exists() {
            Self::load(app, path)?
        } else {
            info!("No cached Google session, starting authorization");
            Self::authorize(app, path).await?
        };

        if session.data.needs_consent_at(Utc::now()) {
            info!("Cached Google session cannot be refreshed, starting authorization");
            session = Self::authorize(session.app, path).await?;
        }

        session.refresh_if_needed().await?;
        Ok(session)
    }

    async fn authorize(app: AppConfig, path: &Path) -> Result<Self> {
        let data = authenticate::run(&app).await?;
        let session = Session {
            app,
            path: path.to_path_buf(),
            data,
        };
        session.save()?;
        Ok(session)
    }

    fn load(app: AppConfig, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to read Google OAuth session from {}",
                path.display()
            )
        })?;

        let data: SessionData = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse Google OAuth session from {}",
                path.display()
            )
        })?;

        Ok(Session {
            app,
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn client(&self) -> Client {
        Client::new(
            self.app.client_id.clone(),
            self.app.client_secret.clone(),
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        )
    }

    pub async fn refresh_if_needed(&mut self) -> Result<()> {
        if self.data.is_expired_at(Utc::now()) {
            self.refresh().await?;
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        info!("Access token expired, refreshing");

        if self.data.refresh_token.is_empty() {
            bail!("No refresh token cached, re-authorization required");
        }

        let mut tokens = self
            .client()
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()?;

        Ok(())
    }
}
