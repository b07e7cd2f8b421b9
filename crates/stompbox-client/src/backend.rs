//! Typed calls against the processing backend.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use stompbox_chain::ChainRequest;
use stompbox_config::ClientConfig;

use crate::error::{ProbeError, TransportError};
use crate::transport::{Transport, UreqTransport};
use crate::wire::{
    AvailableEffectsResponse, DownloadUrlResponse, HealthResponse, InputFilesResponse,
    LocalProcessRequest, LocalProcessResponse, RemoteEffect, StorageProcessRequest,
    StorageProcessResponse, UploadTarget, UploadTargetRequest,
};

/// How the backend obtains its input audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BackendMode {
    /// Files already on the backend's disk, chosen by name.
    #[serde(rename = "local")]
    Local,
    /// Files uploaded to object storage, referenced by key.
    #[serde(rename = "s3")]
    ObjectStorage,
}

impl BackendMode {
    /// Parse the `mode` field of the health response.
    pub fn from_wire(mode: &str) -> Option<Self> {
        match mode {
            "local" => Some(BackendMode::Local),
            "s3" => Some(BackendMode::ObjectStorage),
            _ => None,
        }
    }

    /// The wire token for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            BackendMode::Local => "local",
            BackendMode::ObjectStorage => "s3",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds fetchable URLs from local-mode filenames.
///
/// Names are substituted verbatim, without percent-encoding, matching the
/// paths the backend serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUrls {
    base: String,
}

impl AudioUrls {
    /// Create a builder for the given base URL. A trailing `/` is dropped.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// `{base}/api/audio/{name}`: a processed output file.
    pub fn audio(&self, name: &str) -> String {
        format!("{}/api/audio/{name}", self.base)
    }

    /// `{base}/api/input-audio/{name}`: an unprocessed input file.
    pub fn input_audio(&self, name: &str) -> String {
        format!("{}/api/input-audio/{name}", self.base)
    }

    /// `{base}/api/normalized/{name}`: a display-normalized file.
    pub fn normalized(&self, name: &str) -> String {
        format!("{}/api/normalized/{name}", self.base)
    }

    /// The base URL.
    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Client for the backend's JSON API.
///
/// Every method is a single request with no retry. Failures come back as
/// [`TransportError`] and leave no state behind.
#[derive(Debug, Clone)]
pub struct BackendClient<T = UreqTransport> {
    urls: AudioUrls,
    transport: T,
}

impl BackendClient<UreqTransport> {
    /// Create a client for the configured backend with a `ureq` transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url(), UreqTransport::from_config(config))
    }
}

impl<T: Transport> BackendClient<T> {
    /// Create a client for `base_url` using `transport`.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            urls: AudioUrls::new(base_url),
            transport,
        }
    }

    /// The backend base URL, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        self.urls.base()
    }

    /// URL builder for local-mode filenames.
    pub fn urls(&self) -> &AudioUrls {
        &self.urls
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.urls.base())
    }

    fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, TransportError> {
        let body = self.transport.get(&self.endpoint(path))?;
        decode(&body)
    }

    fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        request: &B,
    ) -> Result<R, TransportError> {
        let body =
            serde_json::to_string(request).map_err(|e| TransportError::Decode(e.to_string()))?;
        let response = self.transport.post_json(&self.endpoint(path), &body)?;
        decode(&response)
    }

    /// Ask the backend which mode it runs in.
    pub fn probe_mode(&self) -> Result<BackendMode, ProbeError> {
        let health: HealthResponse = self.get_json("health")?;
        tracing::debug!(status = %health.status, mode = %health.mode, "capability probe");
        BackendMode::from_wire(&health.mode).ok_or(ProbeError::UnknownMode(health.mode))
    }

    /// Filenames available for local processing.
    pub fn list_input_files(&self) -> Result<Vec<String>, TransportError> {
        let response: InputFilesResponse = self.get_json("input-files")?;
        Ok(response.files)
    }

    /// Effects the backend can run, with its own default parameters.
    pub fn list_available_effects(&self) -> Result<Vec<RemoteEffect>, TransportError> {
        let response: AvailableEffectsResponse = self.get_json("effects")?;
        Ok(response.effects)
    }

    /// Process a file from the backend's input directory.
    pub fn process_local(
        &self,
        input_file: &str,
        effect_chain: &ChainRequest,
    ) -> Result<LocalProcessResponse, TransportError> {
        tracing::info!(input_file, effects = effect_chain.len(), "processing local file");
        self.post_json(
            "process",
            &LocalProcessRequest {
                input_file,
                effect_chain,
            },
        )
    }

    /// Obtain a pre-authorized write target for a new upload.
    pub fn request_upload_target(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadTarget, TransportError> {
        self.post_json(
            "upload-url",
            &UploadTargetRequest {
                filename,
                content_type,
            },
        )
    }

    /// Write raw bytes to a pre-authorized upload URL.
    ///
    /// The URL points at object storage, not at the backend.
    pub fn upload_bytes(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), TransportError> {
        self.transport.put(upload_url, content_type, bytes)
    }

    /// Process a previously uploaded object.
    pub fn process_object_storage(
        &self,
        s3_key: &str,
        effect_chain: &ChainRequest,
    ) -> Result<StorageProcessResponse, TransportError> {
        tracing::info!(s3_key, effects = effect_chain.len(), "processing stored object");
        self.post_json(
            "s3-process",
            &StorageProcessRequest {
                s3_key,
                effect_chain,
            },
        )
    }

    /// Fresh pre-authorized download URL for a stored object.
    pub fn download_url(&self, s3_key: &str) -> Result<String, TransportError> {
        let response: DownloadUrlResponse = self.get_json(&format!("download-url/{s3_key}"))?;
        Ok(response.download_url)
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_wire_tokens() {
        assert_eq!(BackendMode::from_wire("local"), Some(BackendMode::Local));
        assert_eq!(BackendMode::from_wire("s3"), Some(BackendMode::ObjectStorage));
        assert_eq!(BackendMode::from_wire("S3"), None);
        assert_eq!(BackendMode::ObjectStorage.to_string(), "s3");
        assert_eq!(BackendMode::Local.to_string(), "local");
    }

    #[test]
    fn audio_urls_templates() {
        let urls = AudioUrls::new("http://localhost:8000/");
        assert_eq!(urls.base(), "http://localhost:8000");
        assert_eq!(urls.audio("o.wav"), "http://localhost:8000/api/audio/o.wav");
        assert_eq!(
            urls.input_audio("guitar.wav"),
            "http://localhost:8000/api/input-audio/guitar.wav"
        );
        assert_eq!(
            urls.normalized("i.wav"),
            "http://localhost:8000/api/normalized/i.wav"
        );
    }

    #[test]
    fn names_are_not_encoded() {
        let urls = AudioUrls::new("http://h");
        assert_eq!(urls.audio("my take.wav"), "http://h/api/audio/my take.wav");
    }
}
