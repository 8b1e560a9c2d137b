//! meetlight-provider-google - Google Calendar provider for meetlight
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/meetlight/credentials.json
//!   ~/.config/meetlight/token.toml

pub mod app_config;
pub mod authenticate;
pub mod convert;
pub mod session;
pub mod source;

pub use app_config::AppConfig;
pub use session::Session;
pub use source::GoogleEventSource;
