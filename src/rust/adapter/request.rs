use log::{error, info};

use super::payload::{build_payload, Payload};
use super::result::ClassificationResult;
use crate::registry::SpecimenRecord;
use crate::remote::{InferenceClient, RemoteError};

/// Turns form state into a classifier request and the reply into display text.
///
/// The adapter owns its transport, so a fake client can stand in for the real
/// endpoint:
///
/// ```
/// use mushroom_form::{FieldRegistry, InferenceClient, RemoteError, RequestAdapter, SpecimenRecord};
///
/// struct Canned;
///
/// impl InferenceClient for Canned {
///     async fn invoke(&self, _body: Vec<u8>) -> Result<Vec<u8>, RemoteError> {
///         Ok(br#"{"prediction": "edible", "confidence": 87.3}"#.to_vec())
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// let adapter = RequestAdapter::new(Canned);
/// let record = SpecimenRecord::new(FieldRegistry::global());
/// let result = adapter.submit(&record).await;
/// assert_eq!(result.to_string(), "This mushroom is : edible, Confidence: 87.3%");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter<C> {
    client: C,
}

impl<C: InferenceClient> RequestAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Pure mapping from a specimen to the request payload.
    pub fn build_payload(&self, record: &SpecimenRecord<'_>) -> Payload {
        build_payload(record)
    }

    /// Sends `payload` to the endpoint. Never fails: every error becomes a
    /// [`ClassificationResult::Failure`].
    pub async fn classify(&self, payload: &Payload) -> ClassificationResult {
        match self.try_classify(payload).await {
            Ok(result) => {
                info!("Classification succeeded: {}", result);
                result
            }
            Err(e) => {
                error!("Classification failed: {}", e);
                ClassificationResult::failure(e.to_string())
            }
        }
    }

    /// Builds the payload for `record` and classifies it.
    pub async fn submit(&self, record: &SpecimenRecord<'_>) -> ClassificationResult {
        let payload = build_payload(record);
        self.classify(&payload).await
    }

    async fn try_classify(&self, payload: &Payload) -> Result<ClassificationResult, RemoteError> {
        let body = serde_json::to_vec(payload)?;
        let response = self.client.invoke(body).await?;
        ClassificationResult::from_response(&response)
    }
}
