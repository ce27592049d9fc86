mod payload;
mod request;
mod result;

pub use payload::{build_payload, Payload, PayloadValue, RING_TYPE_NONE};
pub use request::RequestAdapter;
pub use result::{ClassificationResult, Confidence, MISSING_CONFIDENCE, UNKNOWN_PREDICTION};
