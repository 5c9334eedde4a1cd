//! The disparity-then-animation flow, and the progress messages it prints.

use crate::client::LeiaPixClient;
use crate::config::Config;
use crate::error::LeiaPixError;
use crate::storage::StorageStrategy;
use crate::types::{
    AnimationRequest, ArtifactKind, CorrelationId, DisparityRequest, PipelineReport,
    StorageUrlPair,
};
use std::io::Write;
use tracing::info;

/// Job parameters that stay the same for both requests of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSettings {
    pub input_image_url: String,
    pub animation_length: u32,
}

impl From<&Config> for JobSettings {
    fn from(config: &Config) -> Self {
        Self {
            input_image_url: config.original_image_url.clone(),
            animation_length: config.animation_length,
        }
    }
}

/// One run of the flow against a given storage strategy.
pub struct Pipeline<'a, S: ?Sized> {
    client: &'a LeiaPixClient,
    strategy: &'a S,
    settings: JobSettings,
}

impl<'a, S> Pipeline<'a, S>
where
    S: StorageStrategy + ?Sized,
{
    pub fn new(client: &'a LeiaPixClient, strategy: &'a S, settings: JobSettings) -> Self {
        Self {
            client,
            strategy,
            settings,
        }
    }

    /// Generates the disparity map, then the animation, writing progress and
    /// the resulting download links to `out`.
    ///
    /// Steps run strictly in order and the first error ends the run: a
    /// failed disparity request means no animation request is made.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<PipelineReport, LeiaPixError> {
        info!(strategy = self.strategy.name(), "starting run");

        let disparity = self.generate_disparity(out).await?;
        let animation = self.generate_animation(&disparity, out).await?;

        Ok(PipelineReport {
            disparity,
            animation,
        })
    }

    async fn generate_disparity<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<StorageUrlPair, LeiaPixError> {
        let artifact = ArtifactKind::Disparity;
        let correlation_id = CorrelationId::new();
        let writable = self
            .strategy
            .resolve_writable_url(self.client, artifact, &correlation_id)
            .await?;

        writeln!(out, "\nGenerating Disparity: {}...", correlation_id)?;

        let request = DisparityRequest {
            correlation_id,
            input_image_url: self.settings.input_image_url.clone(),
            result_presigned_url: writable.clone(),
        };
        let response = self.client.request_disparity(&request).await?;
        let readable = self.strategy.resolve_readable_url(artifact, &response).await?;

        writeln!(
            out,
            "\nDisparity has been uploaded to the {}. To view it, use this GET URL: {}",
            self.strategy.location(),
            readable
        )?;

        Ok(StorageUrlPair { writable, readable })
    }

    async fn generate_animation<W: Write>(
        &self,
        disparity: &StorageUrlPair,
        out: &mut W,
    ) -> Result<StorageUrlPair, LeiaPixError> {
        let artifact = ArtifactKind::Animation;
        let correlation_id = CorrelationId::new();
        let writable = self
            .strategy
            .resolve_writable_url(self.client, artifact, &correlation_id)
            .await?;

        writeln!(out, "\nGenerating mp4 animation: {}...", correlation_id)?;

        let request = AnimationRequest {
            correlation_id,
            input_image_url: self.settings.input_image_url.clone(),
            input_disparity_url: self.strategy.disparity_input_url(disparity),
            result_presigned_url: writable.clone(),
            animation_length: self.settings.animation_length,
        };
        let response = self.client.request_animation(&request).await?;
        let readable = self.strategy.resolve_readable_url(artifact, &response).await?;

        writeln!(
            out,
            "\nMP4 Animation has been uploaded to the {}. To download, please use this GET URL: {}",
            self.strategy.location(),
            readable
        )?;

        Ok(StorageUrlPair { writable, readable })
    }
}
