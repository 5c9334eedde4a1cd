use crate::config::Config;
use crate::error::LeiaPixError;
use crate::types::{AccessToken, TokenResponse};
use tracing::{debug, info};

/// Exchanges the configured client id and secret for a bearer token.
///
/// A single form-encoded `client_credentials` grant is sent to
/// `config.token_url`. The token is not inspected beyond being present.
///
/// # Errors
///
/// - `LeiaPixError::AuthFailed` if the endpoint answers with a non-success status.
/// - `LeiaPixError::ResponseParseFailed` if the body is not JSON.
/// - `LeiaPixError::MissingAccessToken` if the JSON has no `access_token`.
/// - `LeiaPixError::Timeout` / `RequestFailed` for transport failures.
pub async fn acquire_access_token(config: &Config) -> Result<AccessToken, LeiaPixError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    debug!(token_url = %config.token_url, "requesting access token");

    let form = [
        ("client_id", config.credentials.client_id.as_str()),
        ("client_secret", config.credentials.client_secret.as_str()),
        ("grant_type", "client_credentials"),
    ];
    let response = client.post(&config.token_url).form(&form).send().await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(LeiaPixError::AuthFailed {
            status: status.as_u16(),
            body,
        });
    }

    let token_response: TokenResponse = serde_json::from_str(&body)?;
    let token = token_response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(LeiaPixError::MissingAccessToken)?;

    info!("access token acquired");
    Ok(AccessToken::new(token))
}
