//! Run configuration read from environment variables.
//!
//! Everything the flow needs is collected into [`Config`] once at startup and
//! passed down explicitly. Lookups go through a closure so tests can supply a
//! map instead of mutating the process environment.

use crate::error::LeiaPixError;
use crate::types::ClientCredentials;
use std::env;
use std::time::Duration;

pub const CLIENT_ID_VAR: &str = "BACKEND_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "BACKEND_CLIENT_SECRET";
pub const ORIGINAL_IMAGE_URL_VAR: &str = "ORIGINAL_IMAGE_URL";
pub const API_URL_VAR: &str = "LEIAPIX_API_URL";
pub const TOKEN_URL_VAR: &str = "LEIAPIX_TOKEN_URL";
pub const ANIMATION_LENGTH_VAR: &str = "ANIMATION_LENGTH";
pub const S3_BUCKET_NAME_VAR: &str = "S3_BUCKET_NAME";
pub const S3_BUCKET_REGION_VAR: &str = "S3_BUCKET_REGION";
pub const S3_ENDPOINT_URL_VAR: &str = "S3_ENDPOINT_URL";

pub const DEFAULT_API_URL: &str = "https://api.leiapix.com/";
pub const DEFAULT_TOKEN_URL: &str =
    "https://auth.leialoft.com/auth/realms/leialoft/protocol/openid-connect/token";
pub const DEFAULT_ORIGINAL_IMAGE_URL: &str = "https://images.pexels.com/photos/38771/pexels-photo-38771.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";
pub const DEFAULT_ANIMATION_LENGTH: u32 = 5;

/// Client-side cap on every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3 * 60);
/// Lifetime of presigned URLs generated against a caller-owned bucket.
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

const CREDENTIALS_HINT: &str = "In order to authenticate against Leia Media Cloud API, you need \
    to provide BACKEND_CLIENT_ID and BACKEND_CLIENT_SECRET env vars";
const S3_HINT: &str = "In order to use Leia Media Cloud API, you need to provide \
    S3_BUCKET_NAME and S3_BUCKET_REGION env vars";

/// Settings shared by every storage strategy.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: ClientCredentials,
    pub original_image_url: String,
    pub api_base_url: String,
    pub token_url: String,
    pub animation_length: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, LeiaPixError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// - `LeiaPixError::MissingConfig` if the client id or secret is absent or blank.
    /// - `LeiaPixError::InvalidConfig` if `ANIMATION_LENGTH` is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LeiaPixError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = required(&lookup, CLIENT_ID_VAR, CREDENTIALS_HINT)?;
        let client_secret = required(&lookup, CLIENT_SECRET_VAR, CREDENTIALS_HINT)?;

        let animation_length = match optional(&lookup, ANIMATION_LENGTH_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(len) if len > 0 => len,
                Ok(_) => {
                    return Err(LeiaPixError::InvalidConfig {
                        var: ANIMATION_LENGTH_VAR,
                        message: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(LeiaPixError::InvalidConfig {
                        var: ANIMATION_LENGTH_VAR,
                        message: e.to_string(),
                    })
                }
            },
            None => DEFAULT_ANIMATION_LENGTH,
        };

        Ok(Self {
            credentials: ClientCredentials {
                client_id,
                client_secret,
            },
            original_image_url: optional(&lookup, ORIGINAL_IMAGE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_ORIGINAL_IMAGE_URL.to_string()),
            api_base_url: optional(&lookup, API_URL_VAR)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: optional(&lookup, TOKEN_URL_VAR)
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            animation_length,
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}

/// Location of the caller-owned bucket used by [`crate::storage::CallerBucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Endpoint for S3-compatible providers; addressed path-style.
    pub endpoint_url: Option<String>,
    pub presign_expiry: Duration,
}

impl S3Settings {
    /// Reads the bucket settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LeiaPixError::MissingConfig`] when `S3_BUCKET_NAME` or
    /// `S3_BUCKET_REGION` is unset or blank.
    pub fn from_env() -> Result<Self, LeiaPixError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup`. `S3_ENDPOINT_URL` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`LeiaPixError::MissingConfig`] when the bucket name or region
    /// is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LeiaPixError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket: required(&lookup, S3_BUCKET_NAME_VAR, S3_HINT)?,
            region: required(&lookup, S3_BUCKET_REGION_VAR, S3_HINT)?,
            endpoint_url: optional(&lookup, S3_ENDPOINT_URL_VAR),
            presign_expiry: PRESIGN_EXPIRY,
        })
    }
}

/// Blank values count as absent.
fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|value| !value.trim().is_empty())
}

fn required<F>(lookup: &F, var: &'static str, hint: &'static str) -> Result<String, LeiaPixError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(LeiaPixError::MissingConfig { var, hint })
}
