use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::signing::{sign_request, Credentials, SignatureInput, SIGNING_SERVICE};
use super::{InferenceClient, RemoteError, CONTENT_TYPE_JSON};
use crate::config::EndpointConfig;

/// Invokes a hosted inference endpoint over HTTPS.
///
/// Requests are signed with SigV4 when credentials are present; without them
/// they are sent as-is, which only suits gateways reached through an
/// endpoint URL override.
#[derive(Debug, Clone)]
pub struct SageMakerClient {
    http: reqwest::Client,
    config: EndpointConfig,
    invocation_url: Url,
    credentials: Option<Credentials>,
}

impl SageMakerClient {
    /// Creates a client for `config`, picking credentials up from the environment.
    pub fn new(config: EndpointConfig) -> Result<Self, RemoteError> {
        let credentials = Credentials::from_env();
        if credentials.is_none() {
            warn!("No AWS credentials found in the environment, requests will be unsigned");
        }
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(config: EndpointConfig, credentials: Option<Credentials>) -> Result<Self, RemoteError> {
        let invocation_url = Url::parse(&config.invocation_url())
            .map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        info!(
            "Classification endpoint {} in {} at {}",
            config.endpoint_name, config.region, invocation_url
        );
        Ok(Self {
            http,
            config,
            invocation_url,
            credentials,
        })
    }

    pub fn invocation_url(&self) -> &Url {
        &self.invocation_url
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    fn host_header(&self) -> String {
        let host = self.invocation_url.host_str().unwrap_or_default();
        match self.invocation_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }
}

impl InferenceClient for SageMakerClient {
    async fn invoke(&self, body: Vec<u8>) -> Result<Vec<u8>, RemoteError> {
        let mut request = self
            .http
            .post(self.invocation_url.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(credentials) = &self.credentials {
            let host = self.host_header();
            let input = SignatureInput {
                method: "POST",
                host: &host,
                path: self.invocation_url.path(),
                query: self.invocation_url.query().unwrap_or_default(),
                content_type: CONTENT_TYPE_JSON,
                body: &body,
                region: &self.config.region,
                service: SIGNING_SERVICE,
                timestamp: Utc::now(),
            };
            for (name, value) in sign_request(credentials, &input)? {
                request = request.header(name, value);
            }
        }

        debug!("Invoking {} with {} bytes", self.invocation_url, body.len());
        let response = request.body(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("Endpoint answered {} with {} bytes", status, bytes.len());

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).trim().to_string(),
            });
        }
        Ok(bytes.to_vec())
    }
}
