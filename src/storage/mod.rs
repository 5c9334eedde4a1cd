//! Where generated artifacts are written and read back from.
//!
//! A run needs, for each artifact, an optional URL the service can PUT the
//! result to and a URL the end consumer can GET it from. The three ways of
//! getting those URLs are implementations of [`StorageStrategy`]:
//!
//! - [`CallerBucket`]: presigned URLs against a bucket the caller owns.
//! - [`UploadUrlApi`]: the service's upload-URL endpoint issues the writable
//!   half; the job response carries the readable half.
//! - [`VendorManaged`]: the service allocates storage itself and only returns
//!   the readable URL.

mod managed;
mod s3;
mod upload_api;

pub use managed::VendorManaged;
pub use s3::CallerBucket;
pub use upload_api::UploadUrlApi;

use crate::client::LeiaPixClient;
use crate::error::LeiaPixError;
use crate::types::{ArtifactKind, CorrelationId, JobResponse, StorageUrlPair};
use async_trait::async_trait;

#[async_trait]
pub trait StorageStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Human-readable description of where results end up.
    fn location(&self) -> &'static str;

    /// Obtains the URL the service will PUT `artifact` to, before the job is
    /// submitted. `None` lets the service choose.
    async fn resolve_writable_url(
        &self,
        client: &LeiaPixClient,
        artifact: ArtifactKind,
        correlation_id: &CorrelationId,
    ) -> Result<Option<String>, LeiaPixError>;

    /// Produces the URL the consumer can GET `artifact` from. Only called
    /// after the job request has succeeded.
    async fn resolve_readable_url(
        &self,
        artifact: ArtifactKind,
        response: &JobResponse,
    ) -> Result<String, LeiaPixError>;

    /// The disparity URL passed into the animation request, if any.
    fn disparity_input_url(&self, disparity: &StorageUrlPair) -> Option<String> {
        Some(disparity.readable.clone())
    }
}

/// Reads `resultPresignedUrl` out of a job response.
pub(crate) fn result_url(
    artifact: ArtifactKind,
    response: &JobResponse,
) -> Result<String, LeiaPixError> {
    response
        .result_presigned_url
        .clone()
        .filter(|url| !url.is_empty())
        .ok_or(LeiaPixError::MissingResultUrl {
            kind: artifact.label(),
        })
}
