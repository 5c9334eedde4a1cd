use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The client id / secret pair issued in the Leia Login API section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// An OIDC bearer token. Fetched once per run and never refreshed.
///
/// `Debug` output is redacted; use [`as_str`](Self::as_str) to read the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A caller-side identifier for one job request.
///
/// The API passes it through untouched; a fresh one is minted for every
/// disparity or animation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The two artifacts a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Disparity,
    Animation,
}

impl ArtifactKind {
    /// The file name announced to the upload-URL endpoint.
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Disparity => "disparity.jpg",
            ArtifactKind::Animation => "animation.mp4",
        }
    }

    /// MIME type derived from [`file_name`](Self::file_name).
    pub fn media_type(&self) -> String {
        mime_guess::from_path(self.file_name())
            .first_or_octet_stream()
            .to_string()
    }

    /// Object key used when results are written into a caller-owned bucket.
    pub fn object_key(&self) -> &'static str {
        match self {
            ArtifactKind::Disparity => "public/leiapixcloud/disparity.jpg",
            ArtifactKind::Animation => "public/leiapixcloud/animation.mp4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Disparity => "Disparity",
            ArtifactKind::Animation => "Animation",
        }
    }
}

/// Body of `POST /api/v1/disparity`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DisparityRequest {
    pub correlation_id: CorrelationId,
    pub input_image_url: String,
    /// Where the service will PUT the disparity map. Omitted when the vendor
    /// allocates storage itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_presigned_url: Option<String>,
}

/// Body of `POST /api/v1/animation`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRequest {
    pub correlation_id: CorrelationId,
    pub input_image_url: String,
    /// A previously generated disparity map. When absent the service
    /// regenerates one from `input_image_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_disparity_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_presigned_url: Option<String>,
    pub animation_length: u32,
}

/// The `201 Created` body of a job request.
///
/// Caller-managed storage returns nothing useful here, so every field is
/// optional and an empty body is accepted.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(default)]
    pub result_presigned_url: Option<String>,
}

/// (Internal) The `200 OK` body of `GET /api/v1/get-upload-url`.
#[derive(Deserialize, Debug)]
pub(crate) struct UploadUrlResponse {
    pub(crate) url: String,
}

/// (Internal) The token endpoint's JSON body. Only `access_token` is read.
#[derive(Deserialize, Debug)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub(crate) access_token: Option<String>,
}

/// The URLs for one artifact after its job has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUrlPair {
    /// The URL handed to the service for its PUT, if the caller supplied one.
    pub writable: Option<String>,
    /// The URL the end consumer can GET.
    pub readable: String,
}

/// Outcome of a full disparity + animation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub disparity: StorageUrlPair,
    pub animation: StorageUrlPair,
}
