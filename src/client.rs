use crate::config::Config;
use crate::error::LeiaPixError;
use crate::types::{
    AccessToken, AnimationRequest, ArtifactKind, CorrelationId, DisparityRequest, JobResponse,
    UploadUrlResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

/// The client for the LeiaPix Media Cloud REST API.
///
/// Every request carries the bearer token as a default header and is bounded
/// by the configured timeout. Presigned downloads go through a second client
/// without the `Authorization` header, since object stores reject requests
/// that carry two authentication mechanisms.
#[derive(Clone)]
pub struct LeiaPixClient {
    client: reqwest::Client,
    transfer: reqwest::Client,
    base_url: Url,
}

impl LeiaPixClient {
    /// Creates a client for `config.api_base_url` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// - `LeiaPixError::InvalidHeader` if the token cannot be used as a header value.
    /// - `LeiaPixError::UrlParseFailed` if the configured base URL is invalid.
    /// - `LeiaPixError::RequestFailed` if the internal HTTP client fails to build.
    pub fn new(config: &Config, token: &AccessToken) -> Result<Self, LeiaPixError> {
        Self::with_timeout(token, &config.api_base_url, config.request_timeout)
    }

    /// Creates a client against a custom base URL, e.g. a mock server.
    pub fn new_with_url(token: &AccessToken, base_url: &str) -> Result<Self, LeiaPixError> {
        Self::with_timeout(token, base_url, crate::config::REQUEST_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LeiaPixError::InvalidHeader`] if the token cannot be used as
    /// a header value, [`LeiaPixError::UrlParseFailed`] for a malformed
    /// `base_url`, or [`LeiaPixError::RequestFailed`] if the HTTP client
    /// cannot be built.
    pub fn with_timeout(
        token: &AccessToken,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LeiaPixError> {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        let transfer = reqwest::Client::builder().timeout(timeout).build()?;

        // A base without a trailing slash would lose its last segment on join.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        Ok(Self {
            client,
            transfer,
            base_url,
        })
    }

    /// Submits a disparity-map generation job.
    ///
    /// Succeeds only on `201 Created`; any other status is returned as
    /// `LeiaPixError::ApiError` carrying the status and the raw body.
    pub async fn request_disparity(
        &self,
        request: &DisparityRequest,
    ) -> Result<JobResponse, LeiaPixError> {
        info!(correlation_id = %request.correlation_id, "requesting disparity");
        self.submit_job("api/v1/disparity", request).await
    }

    /// Submits an animation generation job.
    ///
    /// Succeeds only on `201 Created`. If `input_disparity_url` is set it must
    /// still be valid when the service fetches it.
    pub async fn request_animation(
        &self,
        request: &AnimationRequest,
    ) -> Result<JobResponse, LeiaPixError> {
        info!(
            correlation_id = %request.correlation_id,
            animation_length = request.animation_length,
            reuses_disparity = request.input_disparity_url.is_some(),
            "requesting animation"
        );
        self.submit_job("api/v1/animation", request).await
    }

    async fn submit_job<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<JobResponse, LeiaPixError> {
        let url = self.base_url.join(endpoint)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(endpoint, status = status.as_u16(), "job response received");

        if status != StatusCode::CREATED {
            return Err(LeiaPixError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        // Caller-managed storage may answer with an empty body.
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    /// Asks the API for a temporary upload URL where the result of the job
    /// identified by `correlation_id` will be stored.
    ///
    /// Succeeds only on `200 OK`.
    pub async fn get_upload_url(
        &self,
        correlation_id: &CorrelationId,
        artifact: ArtifactKind,
    ) -> Result<String, LeiaPixError> {
        let mut url = self.base_url.join("api/v1/get-upload-url")?;
        url.query_pairs_mut()
            .append_pair("correlationId", &correlation_id.to_string())
            .append_pair("fileName", artifact.file_name())
            .append_pair("mediaType", &artifact.media_type());

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            return Err(LeiaPixError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        let upload: UploadUrlResponse = serde_json::from_str(&text)?;
        debug!(%correlation_id, file_name = artifact.file_name(), "upload url issued");
        Ok(upload.url)
    }

    /// Downloads a generated artifact from its readable URL into `dest_dir`.
    ///
    /// The file name is the last path segment of the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails, if the destination directory or
    /// file cannot be created, or if writing the file fails.
    pub async fn download_artifact<P: AsRef<Path>>(
        &self,
        readable_url: &str,
        dest_dir: P,
    ) -> Result<PathBuf, LeiaPixError> {
        let parsed_url = Url::parse(readable_url)?;
        let file_name = parsed_url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("artifact.bin")
            .to_string();

        let response = self.transfer.get(parsed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeiaPixError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        fs::create_dir_all(dest_dir.as_ref()).await?;

        let file_path = dest_dir.as_ref().join(file_name);
        let mut file = fs::File::create(&file_path).await?;
        let content = response.bytes().await?;
        file.write_all(&content).await?;
        file.flush().await?;

        info!(path = %file_path.display(), bytes = content.len(), "artifact downloaded");
        Ok(file_path)
    }
}
