#![allow(dead_code)]

use bytes::Bytes;
use futures::StreamExt as _;
use serde_json::{Value, json};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use thetacam_lib_rs::{
    cam::ThetaCam,
    options::Config,
    transport::{HttpReply, StreamReply, Transport, TransportError},
};

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

impl Request {
    /// Gets the `name` of a command request.
    pub fn command(&self) -> Option<&str> {
        self.body.as_ref()?.get("name")?.as_str()
    }

    /// Gets the `parameters` of a command request.
    pub fn parameters(&self) -> &Value {
        self.body
            .as_ref()
            .and_then(|body| body.get("parameters"))
            .unwrap_or(&Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Result<HttpReply, TransportError>>,
    preview: Option<(u16, Vec<Vec<u8>>)>,
    requests: Vec<Request>,
}

/// Transport replaying scripted replies in order and recording every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: HttpReply) -> &Self {
        self.inner.lock().unwrap().replies.push_back(Ok(reply));
        self
    }

    pub fn push_json(&self, status: u16, body: Value) -> &Self {
        self.push(HttpReply {
            status,
            body: body.to_string(),
        })
    }

    pub fn push_error(&self, err: TransportError) -> &Self {
        self.inner.lock().unwrap().replies.push_back(Err(err));
        self
    }

    /// Scripts the body of the live preview, delivered in the given chunks.
    pub fn set_preview(&self, status: u16, chunks: Vec<Vec<u8>>) {
        self.inner.lock().unwrap().preview = Some((status, chunks));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Gets the names of the commands sent to `/osc/commands/execute`, in order.
    pub fn commands(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|request| request.command().map(String::from))
            .collect()
    }

    pub fn remaining_replies(&self) -> usize {
        self.inner.lock().unwrap().replies.len()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) {
        self.inner.lock().unwrap().requests.push(Request {
            method,
            path: path.to_string(),
            body,
        });
    }

    fn next_reply(&self) -> Result<HttpReply, TransportError> {
        self.inner
            .lock()
            .unwrap()
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted reply left".to_string())))
    }
}

impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        self.record("GET", path, None);
        self.next_reply()
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<HttpReply, TransportError> {
        self.record("POST", path, Some(body));
        self.next_reply()
    }

    async fn post_stream(&self, path: &str, body: Value) -> Result<StreamReply, TransportError> {
        self.record("POST", path, Some(body));

        let (status, chunks) = self
            .inner
            .lock()
            .unwrap()
            .preview
            .take()
            .ok_or_else(|| TransportError::Other("no scripted preview".to_string()))?;

        let body = futures::stream::iter(chunks.into_iter().map(|chunk| Ok(Bytes::from(chunk))))
            .boxed();

        Ok(StreamReply { status, body })
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn cam(init_config: Option<Config>) -> (ThetaCam<MockTransport>, MockTransport) {
    init_logger();

    let transport = MockTransport::new();
    let cam = ThetaCam::with_transport(transport.clone(), init_config);

    (cam, transport)
}

pub fn info(model: &str, firmware_version: &str) -> Value {
    json!({
        "manufacturer": "RICOH",
        "model": model,
        "serialNumber": "00105377",
        "firmwareVersion": firmware_version,
        "supportUrl": "https://theta360.com/en/support/",
        "gps": false,
        "gyro": true,
        "uptime": 67,
        "api": ["/osc/info", "/osc/state", "/osc/checkForUpdates", "/osc/commands/execute", "/osc/commands/status"],
        "endpoints": {"httpPort": 80, "httpUpdatesPort": 80},
        "apiLevel": [1, 2]
    })
}

pub fn state(api_version: u32) -> Value {
    json!({
        "fingerprint": "FIG_0001",
        "state": {
            "sessionId": "SID_0001",
            "batteryLevel": 1.0,
            "storageChanged": false,
            "_apiVersion": api_version,
            "_batteryState": "disconnect",
            "_captureStatus": "idle"
        }
    })
}

pub fn done(name: &str, results: Value) -> Value {
    json!({"name": name, "state": "done", "results": results})
}

pub fn done_empty(name: &str) -> Value {
    json!({"name": name, "state": "done"})
}

pub fn in_progress(name: &str, id: &str, completion: f64) -> Value {
    json!({"name": name, "state": "inProgress", "id": id, "progress": {"completion": completion}})
}

pub fn error(name: &str, code: &str, message: &str) -> Value {
    json!({"name": name, "state": "error", "error": {"code": code, "message": message}})
}

/// `camera.getOptions` result holding the restorable configuration.
pub fn config_options() -> Value {
    done(
        "camera.getOptions",
        json!({"options": {
            "dateTimeZone": "2024:05:01 10:00:00+09:00",
            "_language": "en-US",
            "offDelay": 600,
            "sleepDelay": 180,
            "_shutterVolume": 100
        }}),
    )
}
