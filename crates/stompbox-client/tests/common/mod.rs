//! Scripted transport for protocol tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;
use stompbox_client::{BackendClient, Transport, TransportError};

pub const BASE: &str = "http://fx.test";

/// A request the transport saw.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Post(String, Value),
    Put {
        url: String,
        content_type: String,
        len: usize,
    },
}

/// Answers requests from a queue, in order, and records every call.
///
/// Panics on a request with no queued answer, so an unexpected network call
/// fails the test.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(body.to_string()));
        self
    }

    pub fn reply_empty(self) -> Self {
        self.replies.borrow_mut().push_back(Ok(String::new()));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    /// Queue more answers after the client has been built.
    pub fn push_reply(&self, body: Value) {
        self.replies.borrow_mut().push_back(Ok(body.to_string()));
    }

    pub fn push_failure(&self, err: TransportError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn pending(&self) -> usize {
        self.replies.borrow().len()
    }

    fn next(&self, call: Call) -> Result<String, TransportError> {
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {call:?}"));
        self.calls.borrow_mut().push(call);
        reply
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.next(Call::Get(url.to_string()))
    }

    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let json = serde_json::from_str(body).expect("client sent invalid JSON");
        self.next(Call::Post(url.to_string(), json))
    }

    fn put(&self, url: &str, content_type: &str, body: &[u8]) -> Result<(), TransportError> {
        self.next(Call::Put {
            url: url.to_string(),
            content_type: content_type.to_string(),
            len: body.len(),
        })
        .map(|_| ())
    }
}

pub fn client(transport: ScriptedTransport) -> BackendClient<ScriptedTransport> {
    BackendClient::new(BASE, transport)
}

pub fn url(path: &str) -> String {
    format!("{BASE}/api/{path}")
}
