//! A web form that collects mushroom specimen attributes and asks a remote
//! classification endpoint whether the specimen is edible.
//!
//! The crate holds no model. It declares the form's fields, maps a filled
//! form onto the endpoint's request schema and turns the reply into text.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mushroom_form::{EndpointConfig, FieldRegistry, FieldValue, RequestAdapter, SageMakerClient, SpecimenRecord};
//!
//! let adapter = RequestAdapter::new(SageMakerClient::new(EndpointConfig::default())?);
//!
//! let record = SpecimenRecord::new(FieldRegistry::global())
//!     .with("cap_diameter", FieldValue::Number(7.5))?
//!     .with("has_ring", FieldValue::Flag(true))?
//!     .with("ring_type", FieldValue::Code(1))?;
//!
//! let payload = adapter.build_payload(&record);
//! let result = adapter.classify(&payload).await;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```
//!
//! `classify` never fails: transport and decoding problems come back as a
//! [`ClassificationResult::Failure`] that displays as `System Error: ...`.

pub mod adapter;
pub mod config;
pub mod registry;
pub mod remote;
pub mod web;

pub use adapter::{build_payload, ClassificationResult, Confidence, Payload, PayloadValue, RequestAdapter, RING_TYPE_NONE};
pub use config::{AppConfig, EndpointConfig, ServerConfig};
pub use registry::{
    visible_for, AttributeDefinition, AttributeKind, Choice, Domain, FieldRegistry, FieldValue, RecordError,
    RegistryError, SpecimenRecord,
};
pub use remote::{Credentials, InferenceClient, RemoteError, SageMakerClient};
pub use web::{router, run_server, AppState};

/// Installs the `env_logger` backend at `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
