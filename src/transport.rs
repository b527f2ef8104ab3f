use bytes::Bytes;
use futures::{StreamExt as _, TryStreamExt as _, stream::BoxStream};
use log::*;
use reqwest::Url;
use std::{error::Error as _, future::Future, time::Duration};

use crate::{ThetaError, ThetaResult, consts};

/// Transport-level failure. The request may not have reached the camera.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the interesting part (refused, reset, ...) in the source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_timeout() {
            Self::Timeout(message)
        } else if err.is_connect() {
            Self::Connect(message)
        } else {
            Self::Other(message)
        }
    }
}

/// Status and body of an HTTP reply.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Status and streamed body of an HTTP reply.
pub struct StreamReply {
    pub status: u16,
    pub body: ByteStream,
}

/// Moves requests to the camera and replies back. Paths are relative to the camera endpoint.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpReply, TransportError>> + Send;

    fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply, TransportError>> + Send;

    /// Like `post_json`, but hands the body over as it arrives. Dropping the stream closes the connection.
    fn post_stream(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<StreamReply, TransportError>> + Send;
}

/// [`Transport`] over plain HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Creates the transport with the default timeouts.
    ///
    /// * `endpoint` - Base URL of the camera, such as `http://192.168.1.1`.
    pub fn new(endpoint: &str) -> ThetaResult<Self> {
        Self::new_custom(endpoint, consts::DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates the transport with a custom request timeout.
    ///
    /// * `endpoint` - Base URL of the camera, such as `http://192.168.1.1`.
    /// * `request_timeout` - Timeout of one command, including reading the response.
    ///   Doesn't apply to the live preview stream.
    pub fn new_custom(endpoint: &str, request_timeout: Duration) -> ThetaResult<Self> {
        let mut endpoint = Url::parse(endpoint)
            .map_err(|e| ThetaError::NotConnected(format!("Invalid endpoint {endpoint}: {e}")))?;

        // Paths are joined below the last segment only when it ends with a slash.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(consts::DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ThetaError::NotConnected(TransportError::from(e).to_string()))?;

        Ok(Self {
            client,
            endpoint,
            request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.endpoint
            .join(path)
            .map_err(|e| TransportError::Other(format!("Invalid path {path}: {e}")))
    }

    async fn read_reply(response: reqwest::Response) -> Result<HttpReply, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .get(self.url(path)?)
            .timeout(self.request_timeout)
            .send()
            .await
            .inspect_err(|e| error!("GET {path} failed ({e})"))?;

        Self::read_reply(response).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(self.url(path)?)
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!("POST {path} failed ({e})"))?;

        Self::read_reply(response).await
    }

    async fn post_stream(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<StreamReply, TransportError> {
        let response = self
            .client
            .post(self.url(path)?)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!("POST {path} failed ({e})"))?;

        let status = response.status().as_u16();
        let body = response.bytes_stream().map_err(TransportError::from).boxed();

        Ok(StreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(HttpReply { status: 200, body: String::new() }.is_success());
        assert!(HttpReply { status: 204, body: String::new() }.is_success());
        assert!(!HttpReply { status: 400, body: String::new() }.is_success());
        assert!(!HttpReply { status: 503, body: String::new() }.is_success());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = HttpTransport::new("not a url").err().unwrap();
        assert!(matches!(err, ThetaError::NotConnected(_)));
    }

    #[test]
    fn paths_are_joined_onto_the_endpoint() {
        let transport = HttpTransport::new("http://192.168.1.1").unwrap();

        assert_eq!(
            transport.url(consts::paths::COMMANDS_EXECUTE).unwrap().as_str(),
            "http://192.168.1.1/osc/commands/execute"
        );
    }

    #[test]
    fn endpoint_path_is_kept() {
        for endpoint in ["http://127.0.0.1:8080/theta/", "http://127.0.0.1:8080/theta"] {
            let transport = HttpTransport::new(endpoint).unwrap();

            assert_eq!(
                transport.url(consts::paths::INFO).unwrap().as_str(),
                "http://127.0.0.1:8080/theta/osc/info"
            );
        }
    }

    #[tokio::test]
    async fn silent_camera_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        // Accepts the connection and never answers.
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let transport =
            HttpTransport::new_custom(&format!("http://{address}"), Duration::from_millis(200)).unwrap();

        let err = transport.get(consts::paths::INFO).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)), "{err:?}");

        let ThetaError::NotConnected(message) = ThetaError::from(err) else {
            panic!("timeout not mapped to NotConnected");
        };
        assert!(message.to_lowercase().contains("time"), "{message}");

        server.abort();
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane test machine.
        let transport = HttpTransport::new_custom("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        assert!(transport.get(consts::paths::INFO).await.is_err());
    }
}
