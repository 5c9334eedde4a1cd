use super::{result_url, StorageStrategy};
use crate::client::LeiaPixClient;
use crate::error::LeiaPixError;
use crate::types::{ArtifactKind, CorrelationId, JobResponse, StorageUrlPair};
use async_trait::async_trait;

/// The service allocates storage on its own; jobs are submitted without any
/// result URL and the response carries a short-lived readable URL.
#[derive(Debug, Clone, Copy)]
pub struct VendorManaged {
    /// Pass the disparity result into the animation job instead of letting
    /// the service regenerate it.
    pub reuse_disparity: bool,
}

impl Default for VendorManaged {
    fn default() -> Self {
        Self {
            reuse_disparity: true,
        }
    }
}

#[async_trait]
impl StorageStrategy for VendorManaged {
    fn name(&self) -> &'static str {
        "leiapix-storage"
    }

    fn location(&self) -> &'static str {
        "temporary storage"
    }

    async fn resolve_writable_url(
        &self,
        _client: &LeiaPixClient,
        _artifact: ArtifactKind,
        _correlation_id: &CorrelationId,
    ) -> Result<Option<String>, LeiaPixError> {
        Ok(None)
    }

    async fn resolve_readable_url(
        &self,
        artifact: ArtifactKind,
        response: &JobResponse,
    ) -> Result<String, LeiaPixError> {
        result_url(artifact, response)
    }

    fn disparity_input_url(&self, disparity: &StorageUrlPair) -> Option<String> {
        self.reuse_disparity.then(|| disparity.readable.clone())
    }
}
