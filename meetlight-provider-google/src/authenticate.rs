use anyhow::{Context, Result};
use google_calendar::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app_config::AppConfig;
use crate::session::SessionData;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar.readonly"];

const REDIRECT_PORT: u16 = 8085;

pub fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

pub fn redirect_address() -> String {
    format!("127.0.0.1:{}", REDIRECT_PORT)
}

/// Ask the user for consent in the browser and exchange the returned code
/// for tokens.
pub async fn run(app: &AppConfig) -> Result<SessionData> {
    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

    let mut client = Client::new(
        app.client_id.clone(),
        app.client_secret.clone(),
        redirect_uri(),
        String::new(),
        String::new(),
    );

    let auth_url = consent_url(&client, &scopes);

    eprintln!("\nOpen this URL in your browser to authorize meetlight:\n");
    eprintln!("{}\n", auth_url);

    // Try to open the browser automatically
    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = wait_for_callback().await?;

    eprintln!("\nReceived authorization code, exchanging for tokens...");

    let access_token = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange code for tokens")?;

    eprintln!("Authorization successful!");

    Ok((&access_token).into())
}

/// Consent URL that always asks again, so Google hands out a fresh refresh
/// token even if this app was authorized before.
fn consent_url(client: &Client, scopes: &[String]) -> String {
    format!("{}&prompt=consent", client.user_consent_url(scopes))
}

async fn wait_for_callback() -> Result<(String, String)> {
    let listener = TcpListener::bind(redirect_address())
        .await
        .context("Failed to bind OAuth callback listener")?;

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let (code, state) = parse_callback(&request_line)?;

    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>meetlight is authorized!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok((code, state))
}

/// Extract `code` and `state` from the callback's HTTP request line.
fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;

    if let Some((_, error)) = url.query_pairs().find(|(k, _)| k == "error") {
        anyhow::bail!("Authorization was declined: {}", error);
    }

    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;

    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok((code, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_url_forces_prompt() {
        let client = Client::new("id", "secret", redirect_uri(), "", "");
        let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

        let url = url::Url::parse(&consent_url(&client, &scopes)).unwrap();
        let param = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.to_string())
        };

        assert_eq!(param("prompt").as_deref(), Some("consent"));
        assert_eq!(param("access_type").as_deref(), Some("offline"));
        assert_eq!(param("scope").as_deref(), Some(SCOPES[0]));
    }

    #[test]
    fn test_parse_callback() {
        let (code, state) =
            parse_callback("GET /callback?state=xyz&code=4%2Fabc HTTP/1.1\r\n").unwrap();
        assert_eq!(code, "4/abc");
        assert_eq!(state, "xyz");
    }

    #[test]
    fn test_parse_callback_declined() {
        let err = parse_callback("GET /callback?error=access_denied HTTP/1.1\r\n").unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_parse_callback_without_code() {
        assert!(parse_callback("GET /callback?state=xyz HTTP/1.1\r\n").is_err());
        assert!(parse_callback("garbage").is_err());
    }
}
