/// Everything that can go wrong between reading the environment and printing
/// the final download links.
#[derive(Debug, thiserror::Error)]
pub enum LeiaPixError {
    #[error("{hint} (missing {var})")]
    MissingConfig { var: &'static str, hint: &'static str },
    #[error("Invalid value for {var}: {message}")]
    InvalidConfig { var: &'static str, message: String },
    #[error("Token request returned with an error {status}. The full response is: {body}")]
    AuthFailed { status: u16, body: String },
    #[error("Token response did not contain an access_token")]
    MissingAccessToken,
    #[error("Network request failed: {0}")]
    RequestFailed(reqwest::Error),
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    #[error("Request returned with an error {status}. The full response is: {body}")]
    ApiError { status: u16, body: String },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("Access token is not a valid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    /// Carries the bucket name; the SDK's error chain is only logged.
    #[error("No AWS credentials found for bucket {0}")]
    StorageCredentials(String),
    #[error("Failed to presign {key}: {message}")]
    Presign { key: String, message: String },
    #[error("{kind} response did not contain a resultPresignedUrl")]
    MissingResultUrl { kind: &'static str },
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for LeiaPixError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LeiaPixError::Timeout(err)
        } else {
            LeiaPixError::RequestFailed(err)
        }
    }
}

impl LeiaPixError {
    /// Configuration problems are detected before any request is made.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LeiaPixError::MissingConfig { .. } | LeiaPixError::InvalidConfig { .. }
        )
    }
}
