use std::future::Future;

mod sagemaker;
mod signing;

pub use sagemaker::SageMakerClient;
pub use signing::{derive_signing_key, sign_request, Credentials, SignatureInput, SIGNING_SERVICE};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// The single failure kind of the remote classifier: the call did not produce
/// a usable answer. Variants only record why.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Request to the classification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Classification endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Could not encode the request payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Could not decode the classification response: {0}")]
    Decode(String),
    /// The endpoint answered but reported an error in its body
    #[error("{0}")]
    Remote(String),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("Could not sign the request: {0}")]
    Signing(String),
}

/// Transport to a remote classification endpoint.
///
/// The request adapter owns one of these; tests substitute an in-memory fake.
pub trait InferenceClient {
    /// Sends a JSON request body and returns the raw response body of a
    /// successful call.
    fn invoke(&self, body: Vec<u8>) -> impl Future<Output = Result<Vec<u8>, RemoteError>> + Send;
}
