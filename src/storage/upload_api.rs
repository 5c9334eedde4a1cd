use super::{result_url, StorageStrategy};
use crate::client::LeiaPixClient;
use crate::error::LeiaPixError;
use crate::types::{ArtifactKind, CorrelationId, JobResponse, StorageUrlPair};
use async_trait::async_trait;

/// Results go to the service's temporary storage. The writable URL is
/// requested up front from `get-upload-url` under the job's correlation id;
/// the readable one comes back in the job response.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadUrlApi;

#[async_trait]
impl StorageStrategy for UploadUrlApi {
    fn name(&self) -> &'static str {
        "leiapix-storage-api"
    }

    fn location(&self) -> &'static str {
        "temporary storage"
    }

    async fn resolve_writable_url(
        &self,
        client: &LeiaPixClient,
        artifact: ArtifactKind,
        correlation_id: &CorrelationId,
    ) -> Result<Option<String>, LeiaPixError> {
        client
            .get_upload_url(correlation_id, artifact)
            .await
            .map(Some)
    }

    async fn resolve_readable_url(
        &self,
        artifact: ArtifactKind,
        response: &JobResponse,
    ) -> Result<String, LeiaPixError> {
        result_url(artifact, response)
    }

    /// Temporary-storage upload URLs also serve reads, so the animation job
    /// is pointed at the URL the disparity map was uploaded to.
    fn disparity_input_url(&self, disparity: &StorageUrlPair) -> Option<String> {
        disparity
            .writable
            .clone()
            .or_else(|| Some(disparity.readable.clone()))
    }
}
