//! JSON bodies of the backend API.
//!
//! Field names are part of the contract and must not be renamed.

use serde::{Deserialize, Serialize};
use stompbox_chain::{ChainRequest, ParamMap};

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Liveness marker, `"ok"` when healthy.
    pub status: String,
    /// `"local"` or `"s3"`.
    pub mode: String,
}

/// `GET /api/input-files`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputFilesResponse {
    /// Filenames in the backend's input directory.
    pub files: Vec<String>,
}

/// One entry of `GET /api/effects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEffect {
    /// Api name the backend matches on.
    pub name: String,
    /// The backend's own defaults, merged under request params.
    #[serde(default)]
    pub default_params: ParamMap,
    /// Backend implementation class.
    #[serde(default)]
    pub class_name: String,
}

/// `GET /api/effects`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableEffectsResponse {
    /// Effects the backend can run.
    pub effects: Vec<RemoteEffect>,
}

/// `POST /api/process`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalProcessRequest<'a> {
    /// Filename chosen from the input-files list.
    pub input_file: &'a str,
    /// Enabled effects in processing order.
    pub effect_chain: &'a ChainRequest,
}

/// Response of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalProcessResponse {
    /// Processed output filename.
    pub output_file: String,
    /// Server-relative download path.
    pub download_url: String,
    /// Api names of the effects that ran.
    #[serde(default)]
    pub effects_applied: Vec<String>,
    /// Filename of the display-normalized input.
    pub input_normalized: String,
    /// Filename of the display-normalized output.
    pub output_normalized: String,
}

/// `POST /api/upload-url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTargetRequest<'a> {
    /// Original filename; the backend keeps only its extension.
    pub filename: &'a str,
    /// Content type the upload will be sent with.
    pub content_type: &'a str,
}

/// Response of `POST /api/upload-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    /// Pre-authorized, time-limited write URL.
    pub upload_url: String,
    /// Storage key the file will live under.
    pub s3_key: String,
}

/// `POST /api/s3-process`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageProcessRequest<'a> {
    /// Key returned by the upload step.
    pub s3_key: &'a str,
    /// Enabled effects in processing order.
    pub effect_chain: &'a ChainRequest,
}

/// Response of `POST /api/s3-process`.
///
/// The normalized URLs are optional: some backend builds only return the
/// download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageProcessResponse {
    /// Storage key of the processed output.
    pub output_key: String,
    /// Absolute, pre-authorized download URL.
    pub download_url: String,
    /// Api names of the effects that ran.
    #[serde(default)]
    pub effects_applied: Vec<String>,
    /// Absolute URL of the display-normalized input.
    #[serde(default)]
    pub input_normalized_url: Option<String>,
    /// Absolute URL of the display-normalized output.
    #[serde(default)]
    pub output_normalized_url: Option<String>,
}

/// `GET /api/download-url/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadUrlResponse {
    /// Fresh pre-authorized download URL.
    pub download_url: String,
}
