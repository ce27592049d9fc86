pub const DEFAULT_ENDPOINT_NAME: &str = "mushroom-endpoint";
pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7860;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where the classification endpoint lives. Fixed deployment configuration,
/// never user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub endpoint_name: String,
    pub region: String,
    /// Replaces `https://runtime.sagemaker.{region}.amazonaws.com` when set
    pub endpoint_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint_name: DEFAULT_ENDPOINT_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EndpointConfig {
    pub fn base_url(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://runtime.sagemaker.{}.amazonaws.com", self.region),
        }
    }

    pub fn invocation_url(&self) -> String {
        format!("{}/endpoints/{}/invocations", self.base_url(), self.endpoint_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub server: ServerConfig,
}
