//! One processing session: source selection, upload, and submit-to-result.
//!
//! A session runs one submission at a time. Submitting is split into three
//! steps so the in-flight state is observable without threads:
//!
//! 1. [`ProcessingSession::begin_submit`] validates, snapshots the chain and
//!    moves to [`Phase::Submitting`].
//! 2. [`Submission::send`] performs the network call. It owns its snapshot,
//!    so the chain can keep changing meanwhile.
//! 3. [`ProcessingSession::complete`] records the result and returns to
//!    [`Phase::Idle`].
//!
//! [`ProcessingSession::submit`] runs all three.

use serde::Serialize;
use stompbox_chain::{ChainRequest, EffectChain};

use crate::backend::{AudioUrls, BackendClient, BackendMode};
use crate::error::{SessionError, TransportError, ValidationError};
use crate::transport::Transport;
use crate::wire::{LocalProcessResponse, StorageProcessResponse};

/// Whether a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight; a submission may start.
    #[default]
    Idle,
    /// A submission has begun and not yet completed.
    Submitting,
}

/// Progress of the object-storage upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Nothing uploaded yet.
    #[default]
    Empty,
    /// Both upload steps succeeded; `key` is the resolved source reference.
    Uploaded {
        /// Name of the uploaded file.
        filename: String,
        /// Storage key to submit.
        key: String,
    },
    /// The last upload attempt failed.
    Failed {
        /// Name of the file that failed to upload.
        filename: String,
        /// User-facing failure message.
        message: String,
    },
}

impl UploadState {
    /// The storage key, once an upload has succeeded.
    pub fn key(&self) -> Option<&str> {
        match self {
            UploadState::Uploaded { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Where the session gets its input, by backend mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// Pick a file the backend already has.
    Local {
        /// Filenames enumerated by the backend.
        files: Vec<String>,
        /// The chosen file, always one of `files`.
        selected: Option<String>,
    },
    /// Upload a file to object storage first.
    ObjectStorage {
        /// Upload progress.
        upload: UploadState,
    },
}

impl SourceMode {
    /// An empty source for the given mode.
    pub fn for_mode(mode: BackendMode) -> Self {
        match mode {
            BackendMode::Local => SourceMode::Local {
                files: Vec::new(),
                selected: None,
            },
            BackendMode::ObjectStorage => SourceMode::ObjectStorage {
                upload: UploadState::Empty,
            },
        }
    }

    /// The mode this source belongs to.
    pub fn mode(&self) -> BackendMode {
        match self {
            SourceMode::Local { .. } => BackendMode::Local,
            SourceMode::ObjectStorage { .. } => BackendMode::ObjectStorage,
        }
    }

    /// The resolved source reference, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            SourceMode::Local { selected, .. } => selected.as_deref(),
            SourceMode::ObjectStorage { upload } => upload.key(),
        }
    }
}

/// The resolved input of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionSource {
    /// A filename known to the backend.
    LocalFile(String),
    /// An object-storage key.
    StorageKey(String),
}

/// A validated submission, detached from the session.
///
/// Not `Clone`: one submission is sent at most once.
#[derive(Debug, PartialEq)]
pub struct Submission {
    source: SubmissionSource,
    chain: ChainRequest,
}

impl Submission {
    /// The input this submission processes.
    pub fn source(&self) -> &SubmissionSource {
        &self.source
    }

    /// The chain captured when the submission began.
    pub fn chain(&self) -> &ChainRequest {
        &self.chain
    }

    /// Send the processing request. Makes exactly one network call.
    pub fn send<T: Transport>(
        self,
        client: &BackendClient<T>,
    ) -> Result<ProcessResponse, TransportError> {
        match &self.source {
            SubmissionSource::LocalFile(name) => client
                .process_local(name, &self.chain)
                .map(ProcessResponse::Local),
            SubmissionSource::StorageKey(key) => client
                .process_object_storage(key, &self.chain)
                .map(ProcessResponse::ObjectStorage),
        }
    }
}

/// Raw backend response for a completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode")]
pub enum ProcessResponse {
    /// Filenames, to be turned into URLs locally.
    #[serde(rename = "local")]
    Local(LocalProcessResponse),
    /// Absolute URLs, used as is.
    #[serde(rename = "s3")]
    ObjectStorage(StorageProcessResponse),
}

impl ProcessResponse {
    /// Api names of the effects the backend applied.
    pub fn effects_applied(&self) -> &[String] {
        match self {
            ProcessResponse::Local(r) => &r.effects_applied,
            ProcessResponse::ObjectStorage(r) => &r.effects_applied,
        }
    }
}

/// Fetchable URLs for playing back a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackUrls {
    /// Normalized input, when the backend provides one.
    pub input: Option<String>,
    /// Normalized output, or the download URL when no normalized copy exists.
    pub output: String,
    /// The processed file at full level.
    pub download: String,
}

impl PlaybackUrls {
    /// Derive playback URLs from a response.
    ///
    /// Local responses carry filenames that are substituted into `urls`.
    /// Object-storage responses already carry absolute URLs.
    pub fn from_response(response: &ProcessResponse, urls: &AudioUrls) -> Self {
        match response {
            ProcessResponse::Local(r) => PlaybackUrls {
                input: Some(urls.normalized(&r.input_normalized)),
                output: urls.normalized(&r.output_normalized),
                download: urls.audio(&r.output_file),
            },
            ProcessResponse::ObjectStorage(r) => PlaybackUrls {
                input: r.input_normalized_url.clone(),
                output: r
                    .output_normalized_url
                    .clone()
                    .unwrap_or_else(|| r.download_url.clone()),
                download: r.download_url.clone(),
            },
        }
    }
}

/// The result of the most recent successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// What the backend returned.
    pub response: ProcessResponse,
    /// Where to fetch the audio from.
    pub playback: PlaybackUrls,
}

/// Processing session state.
///
/// The mode is fixed at construction and never re-probed. At most one
/// submission is in flight, and a new one supersedes the previous outcome.
#[derive(Debug, Clone)]
pub struct ProcessingSession {
    urls: AudioUrls,
    source: SourceMode,
    phase: Phase,
    outcome: Option<ProcessOutcome>,
    error: Option<String>,
}

impl ProcessingSession {
    /// Probe the backend and start a session in the reported mode.
    ///
    /// A failed probe is not an error: the session starts in local mode. In
    /// local mode the input files are enumerated right away; if that fails
    /// the list stays empty and can be refreshed later.
    pub fn connect<T: Transport>(client: &BackendClient<T>) -> Self {
        let mode = match client.probe_mode() {
            Ok(mode) => mode,
            Err(err) => {
                tracing::warn!(error = %err, "capability probe failed, defaulting to local mode");
                BackendMode::Local
            }
        };
        tracing::info!(%mode, base = client.base_url(), "session started");

        let mut session = Self::new(client.urls().clone(), SourceMode::for_mode(mode));
        if mode == BackendMode::Local {
            if let Err(err) = session.refresh_files(client) {
                tracing::warn!(error = %err, "failed to list input files");
            }
        }
        session
    }

    /// Create a session with a known source, without probing.
    pub fn new(urls: AudioUrls, source: SourceMode) -> Self {
        Self {
            urls,
            source,
            phase: Phase::Idle,
            outcome: None,
            error: None,
        }
    }

    /// The backend mode.
    pub fn mode(&self) -> BackendMode {
        self.source.mode()
    }

    /// Mode-specific source state.
    pub fn source(&self) -> &SourceMode {
        &self.source
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// The single readiness gate: idle, an input resolved, and at least one
    /// effect enabled in `chain`.
    pub fn is_ready(&self, chain: &EffectChain) -> bool {
        self.phase == Phase::Idle
            && self.source.reference().is_some()
            && chain.enabled_count() > 0
    }

    /// Selected filename or uploaded key.
    pub fn source_reference(&self) -> Option<&str> {
        self.source.reference()
    }

    /// Enumerated input files. Empty in object-storage mode.
    pub fn input_files(&self) -> &[String] {
        match &self.source {
            SourceMode::Local { files, .. } => files,
            SourceMode::ObjectStorage { .. } => &[],
        }
    }

    /// Choose a local input file. It must be one the backend listed.
    pub fn select_file(&mut self, name: &str) -> Result<(), SessionError> {
        let actual = self.mode();
        match &mut self.source {
            SourceMode::Local { files, selected } => {
                if !files.iter().any(|f| f == name) {
                    return Err(SessionError::UnknownInputFile(name.to_string()));
                }
                tracing::debug!(file = name, "input file selected");
                *selected = Some(name.to_string());
                Ok(())
            }
            SourceMode::ObjectStorage { .. } => Err(SessionError::WrongMode {
                expected: BackendMode::Local,
                actual,
            }),
        }
    }

    /// Re-enumerate local input files.
    ///
    /// The selection survives if the file is still listed.
    pub fn refresh_files<T: Transport>(
        &mut self,
        client: &BackendClient<T>,
    ) -> Result<&[String], SessionError> {
        let actual = self.mode();
        let SourceMode::Local { files, selected } = &mut self.source else {
            return Err(SessionError::WrongMode {
                expected: BackendMode::Local,
                actual,
            });
        };

        let listed = client.list_input_files()?;
        tracing::debug!(count = listed.len(), "input files listed");
        if selected.as_ref().is_some_and(|s| !listed.contains(s)) {
            *selected = None;
        }
        *files = listed;
        Ok(files.as_slice())
    }

    /// Upload a file to object storage: obtain a write target, then write
    /// the bytes to it.
    ///
    /// Any previous key is cleared first, so a failure leaves the source
    /// unresolved. Returns the new storage key.
    pub fn upload<T: Transport>(
        &mut self,
        client: &BackendClient<T>,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, SessionError> {
        let actual = self.mode();
        let SourceMode::ObjectStorage { upload } = &mut self.source else {
            return Err(SessionError::WrongMode {
                expected: BackendMode::ObjectStorage,
                actual,
            });
        };
        *upload = UploadState::Empty;

        let result = client
            .request_upload_target(filename, content_type)
            .and_then(|target| {
                client.upload_bytes(&target.upload_url, content_type, bytes)?;
                Ok(target.s3_key)
            });

        match result {
            Ok(key) => {
                tracing::info!(filename, key = %key, bytes = bytes.len(), "upload complete");
                *upload = UploadState::Uploaded {
                    filename: filename.to_string(),
                    key: key.clone(),
                };
                Ok(key)
            }
            Err(err) => {
                tracing::warn!(filename, error = %err, "upload failed");
                *upload = UploadState::Failed {
                    filename: filename.to_string(),
                    message: err.user_message(),
                };
                Err(err.into())
            }
        }
    }

    /// Forget the uploaded file.
    pub fn clear_upload(&mut self) {
        if let SourceMode::ObjectStorage { upload } = &mut self.source {
            *upload = UploadState::Empty;
        }
    }

    /// Message of the last failed upload, kept apart from processing errors.
    pub fn upload_error(&self) -> Option<&str> {
        match &self.source {
            SourceMode::ObjectStorage {
                upload: UploadState::Failed { message, .. },
            } => Some(message),
            _ => None,
        }
    }

    /// URL for previewing the unprocessed input before submitting.
    ///
    /// Only local mode has one; uploaded files are previewed from the
    /// caller's own copy.
    pub fn input_preview_url(&self) -> Option<String> {
        match &self.source {
            SourceMode::Local {
                selected: Some(name),
                ..
            } => Some(self.urls.input_audio(name)),
            _ => None,
        }
    }

    /// Validate and start a submission.
    ///
    /// Returns `Ok(None)` without doing anything while another submission
    /// is in flight. Validation failures never change the phase.
    pub fn begin_submit(
        &mut self,
        chain: &EffectChain,
    ) -> Result<Option<Submission>, ValidationError> {
        if self.phase == Phase::Submitting {
            tracing::debug!("submission already in flight, ignoring");
            return Ok(None);
        }

        match self.validate(chain) {
            Ok(submission) => {
                self.phase = Phase::Submitting;
                self.outcome = None;
                self.error = None;
                tracing::debug!(
                    effects = submission.chain.len(),
                    source = ?submission.source,
                    "submission started"
                );
                Ok(Some(submission))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn validate(&self, chain: &EffectChain) -> Result<Submission, ValidationError> {
        let request = chain.to_chain_request();
        if request.is_empty() {
            return Err(ValidationError::EmptyChain);
        }

        let source = match &self.source {
            SourceMode::Local {
                selected: Some(name),
                ..
            } => SubmissionSource::LocalFile(name.clone()),
            SourceMode::Local { selected: None, .. } => {
                return Err(ValidationError::NoInputFile);
            }
            SourceMode::ObjectStorage { upload } => match upload.key() {
                Some(key) => SubmissionSource::StorageKey(key.to_string()),
                None => return Err(ValidationError::NoUpload),
            },
        };

        Ok(Submission {
            source,
            chain: request,
        })
    }

    /// Record the result of [`Submission::send`] and return to idle.
    ///
    /// A result arriving while no submission is in flight is rejected with
    /// [`SessionError::NotSubmitting`] and leaves the session unchanged.
    pub fn complete(
        &mut self,
        result: Result<ProcessResponse, TransportError>,
    ) -> Result<&ProcessOutcome, SessionError> {
        if self.phase != Phase::Submitting {
            tracing::warn!("ignoring a result with no submission in flight");
            return Err(SessionError::NotSubmitting);
        }
        self.phase = Phase::Idle;

        match result {
            Ok(response) => {
                let playback = PlaybackUrls::from_response(&response, &self.urls);
                tracing::info!(
                    effects = ?response.effects_applied(),
                    output = %playback.output,
                    "processing complete"
                );
                Ok(&*self.outcome.insert(ProcessOutcome { response, playback }))
            }
            Err(err) => {
                tracing::warn!(error = %err, "processing failed");
                self.outcome = None;
                self.error = Some(err.user_message());
                Err(err.into())
            }
        }
    }

    /// Validate, send, and complete in one call.
    ///
    /// Returns `Ok(None)` if a submission was already in flight.
    pub fn submit<T: Transport>(
        &mut self,
        chain: &EffectChain,
        client: &BackendClient<T>,
    ) -> Result<Option<&ProcessOutcome>, SessionError> {
        let Some(submission) = self.begin_submit(chain)? else {
            return Ok(None);
        };
        let result = submission.send(client);
        self.complete(result).map(Some)
    }

    /// Outcome of the latest successful submission.
    pub fn outcome(&self) -> Option<&ProcessOutcome> {
        self.outcome.as_ref()
    }

    /// User-facing message of the latest failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_session(files: &[&str]) -> ProcessingSession {
        ProcessingSession::new(
            AudioUrls::new("http://fx"),
            SourceMode::Local {
                files: files.iter().map(ToString::to_string).collect(),
                selected: None,
            },
        )
    }

    fn chain_with(api_names: &[&str]) -> EffectChain {
        let mut chain = EffectChain::new();
        for name in api_names {
            let id = chain.find_by_api_name(name).unwrap().id();
            chain.toggle(id);
        }
        chain
    }

    #[test]
    fn empty_chain_is_checked_before_source() {
        let mut session = local_session(&[]);
        let err = session.begin_submit(&chain_with(&[])).unwrap_err();
        assert_eq!(err, ValidationError::EmptyChain);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), Some("Please enable at least one effect"));
    }

    #[test]
    fn missing_source_per_mode() {
        let chain = chain_with(&["Fuzz"]);

        let mut local = local_session(&["a.wav"]);
        assert_eq!(
            local.begin_submit(&chain).unwrap_err(),
            ValidationError::NoInputFile
        );

        let mut storage = ProcessingSession::new(
            AudioUrls::new("http://fx"),
            SourceMode::for_mode(BackendMode::ObjectStorage),
        );
        assert_eq!(
            storage.begin_submit(&chain).unwrap_err(),
            ValidationError::NoUpload
        );
    }

    #[test]
    fn begin_submit_gates_until_complete() {
        let mut session = local_session(&["a.wav"]);
        session.select_file("a.wav").unwrap();
        let chain = chain_with(&["Chorus"]);
        assert!(session.is_ready(&chain));

        let first = session.begin_submit(&chain).unwrap();
        assert!(first.is_some());
        assert!(session.is_submitting());
        assert!(!session.is_ready(&chain));
        assert_eq!(session.begin_submit(&chain).unwrap(), None);

        let err = TransportError::Network("timed out".to_string());
        assert!(session.complete(Err(err)).is_err());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), Some("network error: timed out"));
        assert!(session.outcome().is_none());
        assert!(session.is_ready(&chain));
    }

    #[test]
    fn complete_without_begin_is_rejected() {
        let mut session = local_session(&["a.wav"]);
        let err = TransportError::Network("late".to_string());

        assert_eq!(
            session.complete(Err(err)).unwrap_err(),
            SessionError::NotSubmitting
        );
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn select_file_must_be_listed() {
        let mut session = local_session(&["a.wav"]);
        assert_eq!(
            session.select_file("b.wav"),
            Err(SessionError::UnknownInputFile("b.wav".to_string()))
        );
        assert_eq!(session.source_reference(), None);
        assert_eq!(session.input_preview_url(), None);

        session.select_file("a.wav").unwrap();
        assert_eq!(session.source_reference(), Some("a.wav"));
        assert_eq!(
            session.input_preview_url().as_deref(),
            Some("http://fx/api/input-audio/a.wav")
        );
    }

    #[test]
    fn select_file_in_storage_mode_is_wrong_mode() {
        let mut session = ProcessingSession::new(
            AudioUrls::new("http://fx"),
            SourceMode::for_mode(BackendMode::ObjectStorage),
        );
        assert_eq!(
            session.select_file("a.wav"),
            Err(SessionError::WrongMode {
                expected: BackendMode::Local,
                actual: BackendMode::ObjectStorage,
            })
        );
        assert!(session.input_files().is_empty());
    }

    #[test]
    fn storage_playback_falls_back_to_download_url() {
        let response = ProcessResponse::ObjectStorage(StorageProcessResponse {
            output_key: "output/x.wav".to_string(),
            download_url: "https://bucket/x?sig".to_string(),
            effects_applied: vec!["Reverb".to_string()],
            input_normalized_url: None,
            output_normalized_url: None,
        });
        let playback = PlaybackUrls::from_response(&response, &AudioUrls::new("http://fx"));
        assert_eq!(playback.input, None);
        assert_eq!(playback.output, "https://bucket/x?sig");
        assert_eq!(playback.download, "https://bucket/x?sig");
    }

    #[test]
    fn process_response_serializes_with_mode_tag() {
        let response = ProcessResponse::Local(LocalProcessResponse {
            output_file: "o.wav".to_string(),
            download_url: "/api/audio/o.wav".to_string(),
            effects_applied: vec![],
            input_normalized: "i.wav".to_string(),
            output_normalized: "o_n.wav".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["mode"], "local");
        assert_eq!(json["output_file"], "o.wav");
    }
}
