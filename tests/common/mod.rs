#![allow(dead_code)]

use std::sync::Mutex;

use mushroom_form::{InferenceClient, RemoteError};

/// In-memory stand-in for the classification endpoint.
pub struct FakeClient {
    reply: Result<Vec<u8>, String>,
    requests: Mutex<Vec<serde_json::Value>>,
}

impl FakeClient {
    pub fn replying(body: &str) -> Self {
        Self {
            reply: Ok(body.as_bytes().to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Request bodies received so far, decoded as JSON.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests.lock().unwrap().clone()
    }
}

impl InferenceClient for FakeClient {
    async fn invoke(&self, body: Vec<u8>) -> Result<Vec<u8>, RemoteError> {
        let request = serde_json::from_slice(&body).expect("adapter sent invalid JSON");
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(bytes) => Ok(bytes.clone()),
            Err(message) => Err(RemoteError::Remote(message.clone())),
        }
    }
}
