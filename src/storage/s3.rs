use super::StorageStrategy;
use crate::client::LeiaPixClient;
use crate::config::S3Settings;
use crate::error::LeiaPixError;
use crate::types::{ArtifactKind, CorrelationId, JobResponse};
use async_trait::async_trait;
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region, SharedCredentialsProvider};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use std::error::Error;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Access {
    Put,
    Get,
}

/// Results are written into a bucket the caller owns, through presigned URLs
/// generated locally with the caller's AWS credentials.
///
/// Each artifact has a fixed object key, so consecutive runs overwrite each
/// other's results.
#[derive(Clone, Debug)]
pub struct CallerBucket {
    client: aws_sdk_s3::Client,
    bucket: String,
    expires_in: Duration,
}

impl CallerBucket {
    /// Builds the S3 client from the default AWS credential chain
    /// (environment, profile, instance metadata) and `settings.region`.
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config);
        if let Some(endpoint_url) = &settings.endpoint_url {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        Self::from_client(
            aws_sdk_s3::Client::from_conf(s3_config_builder.build()),
            settings,
        )
    }

    /// Builds the S3 client from explicit credentials instead of the default
    /// chain.
    pub fn with_credentials(settings: &S3Settings, credentials: Credentials) -> Self {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(SharedCredentialsProvider::new(credentials));

        if let Some(endpoint_url) = &settings.endpoint_url {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        Self::from_client(
            aws_sdk_s3::Client::from_conf(s3_config_builder.build()),
            settings,
        )
    }

    /// Wraps an already configured S3 client.
    pub fn from_client(client: aws_sdk_s3::Client, settings: &S3Settings) -> Self {
        Self {
            client,
            bucket: settings.bucket.clone(),
            expires_in: settings.presign_expiry,
        }
    }

    async fn presign(&self, access: Access, key: &str) -> Result<String, LeiaPixError> {
        if self.client.config().credentials_provider().is_none() {
            debug!(bucket = %self.bucket, key, "s3 client has no credentials provider");
            return Err(LeiaPixError::StorageCredentials(self.bucket.clone()));
        }

        let presigning_config =
            PresigningConfig::expires_in(self.expires_in).map_err(|e| LeiaPixError::Presign {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let presigned = match access {
            Access::Put => self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(key)
                .presigned(presigning_config)
                .await
                .map_err(|e| self.presign_error(key, e))?,
            Access::Get => self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(key)
                .presigned(presigning_config)
                .await
                .map_err(|e| self.presign_error(key, e))?,
        };

        debug!(bucket = %self.bucket, key, ?access, "presigned url generated");
        Ok(presigned.uri().to_string())
    }
}

/// Credential failures are surfaced by the SDK as dispatch or construction
/// failures; the `CredentialsError` is somewhere down the source chain.
fn caused_by_credentials(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<CredentialsError>() {
            return true;
        }
        current = e.source();
    }
    false
}

fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        message.push_str(": ");
        message.push_str(&e.to_string());
        current = e.source();
    }
    message
}

impl CallerBucket {
    fn presign_error<E>(&self, key: &str, err: E) -> LeiaPixError
    where
        E: Error + 'static,
    {
        debug!(
            bucket = %self.bucket,
            key,
            error = %DisplayErrorContext(&err),
            "presigning failed"
        );

        if caused_by_credentials(&err) {
            LeiaPixError::StorageCredentials(self.bucket.clone())
        } else {
            LeiaPixError::Presign {
                key: key.to_string(),
                message: error_chain(&err),
            }
        }
    }
}

#[async_trait]
impl StorageStrategy for CallerBucket {
    fn name(&self) -> &'static str {
        "custom-storage"
    }

    fn location(&self) -> &'static str {
        "specified AWS S3 bucket"
    }

    async fn resolve_writable_url(
        &self,
        _client: &LeiaPixClient,
        artifact: ArtifactKind,
        _correlation_id: &CorrelationId,
    ) -> Result<Option<String>, LeiaPixError> {
        self.presign(Access::Put, artifact.object_key()).await.map(Some)
    }

    async fn resolve_readable_url(
        &self,
        artifact: ArtifactKind,
        _response: &JobResponse,
    ) -> Result<String, LeiaPixError> {
        self.presign(Access::Get, artifact.object_key()).await
    }
}
