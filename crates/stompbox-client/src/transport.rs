//! HTTP transport seam.
//!
//! [`BackendClient`](crate::BackendClient) speaks JSON through a
//! [`Transport`], so protocol logic can run against a scripted transport in
//! tests and against [`UreqTransport`] everywhere else.

use std::time::Duration;

use stompbox_config::ClientConfig;

use crate::error::TransportError;

/// Blocking HTTP operations the protocol needs.
///
/// Implementations map any non-2xx response to [`TransportError::Status`]
/// (see [`TransportError::from_status`]) and anything that never produced a
/// response to [`TransportError::Network`].
pub trait Transport {
    /// `GET url`, returning the response body.
    fn get(&self, url: &str) -> Result<String, TransportError>;

    /// `POST url` with a JSON body, returning the response body.
    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError>;

    /// `PUT url` with a raw body. The response body is ignored.
    fn put(&self, url: &str, content_type: &str, body: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }

    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        (**self).post_json(url, body)
    }

    fn put(&self, url: &str, content_type: &str, body: &[u8]) -> Result<(), TransportError> {
        (**self).put(url, content_type, body)
    }
}

/// [`Transport`] backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with explicit timeouts.
    ///
    /// `request_timeout` bounds the whole request, including reading the
    /// body, so a stuck processing call eventually fails instead of hanging.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(request_timeout)
            .build();
        Self { agent }
    }

    /// Create a transport using the timeouts from a configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.connect_timeout(), config.request_timeout())
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        tracing::trace!(url, "GET");
        read_body(
            self.agent
                .get(url)
                .set("Accept", "application/json")
                .call(),
        )
    }

    fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        tracing::trace!(url, bytes = body.len(), "POST");
        read_body(
            self.agent
                .post(url)
                .set("Content-Type", "application/json")
                .set("Accept", "application/json")
                .send_string(body),
        )
    }

    fn put(&self, url: &str, content_type: &str, body: &[u8]) -> Result<(), TransportError> {
        tracing::trace!(bytes = body.len(), content_type, "PUT");
        read_body(
            self.agent
                .put(url)
                .set("Content-Type", content_type)
                .send_bytes(body),
        )
        .map(|_| ())
    }
}

fn read_body(result: Result<ureq::Response, ureq::Error>) -> Result<String, TransportError> {
    match result {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| TransportError::Decode(e.to_string())),
        Err(ureq::Error::Status(code, resp)) => {
            let text = resp.into_string().unwrap_or_default();
            Err(TransportError::from_status(code, &text))
        }
        Err(err) => Err(TransportError::Network(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_network_error() {
        // Reserve a free loopback port, then release it so nothing listens.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = UreqTransport::new(Duration::from_millis(200), Duration::from_millis(500));
        let err = transport
            .get(&format!("http://{addr}/api/health"))
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)), "got: {err:?}");
    }
}
