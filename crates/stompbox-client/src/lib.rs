//! Processing session protocol for the stompbox audio-effects backend.
//!
//! The backend runs in one of two modes, reported by a capability probe:
//!
//! - **Local**: it processes files already on its own disk. The client picks
//!   one from an enumerated list and derives playback URLs from the returned
//!   filenames.
//! - **Object storage**: the client first uploads the file through a
//!   pre-authorized URL, then submits the resulting storage key. Returned
//!   playback references are already absolute URLs.
//!
//! [`ProcessingSession`] drives one submit-to-result cycle at a time in
//! either mode, validates before touching the network, and exposes a single
//! readiness gate.
//!
//! # Example
//!
//! ```rust,no_run
//! use stompbox_chain::EffectChain;
//! use stompbox_client::{BackendClient, ProcessingSession};
//! use stompbox_config::ClientConfig;
//!
//! let config = ClientConfig::resolve(None).unwrap();
//! let client = BackendClient::from_config(&config);
//! let mut session = ProcessingSession::connect(&client);
//!
//! let mut chain = EffectChain::new();
//! let chorus = chain.find_by_api_name("Chorus").unwrap().id();
//! chain.toggle(chorus);
//!
//! session.select_file("guitar.wav").unwrap();
//! if let Some(outcome) = session.submit(&chain, &client).unwrap() {
//!     println!("output: {:?}", outcome.playback.output);
//! }
//! ```

mod backend;
mod error;
mod session;
mod transport;

/// Request and response bodies exchanged with the backend.
pub mod wire;

pub use backend::{AudioUrls, BackendClient, BackendMode};
pub use error::{ProbeError, SessionError, TransportError, ValidationError};
pub use session::{
    Phase, PlaybackUrls, ProcessOutcome, ProcessResponse, ProcessingSession, SourceMode,
    Submission, SubmissionSource, UploadState,
};
pub use transport::{Transport, UreqTransport};
