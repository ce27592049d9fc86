use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mushroom_form::config::{DEFAULT_ENDPOINT_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS};
use mushroom_form::{AppConfig, AppState, EndpointConfig, FieldRegistry, RequestAdapter, SageMakerClient, ServerConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the inference endpoint
    #[arg(long, env = "MUSHROOM_ENDPOINT_NAME", default_value = DEFAULT_ENDPOINT_NAME)]
    endpoint_name: String,

    /// Region hosting the endpoint
    #[arg(long, env = "MUSHROOM_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Base URL replacing the regional runtime host, e.g. a local gateway
    #[arg(long, env = "MUSHROOM_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Seconds to wait for the endpoint before giving up
    #[arg(long, env = "MUSHROOM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Address to bind the form server to
    #[arg(long, env = "MUSHROOM_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to serve the form on
    #[arg(short, long, env = "MUSHROOM_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            endpoint: EndpointConfig {
                endpoint_name: args.endpoint_name,
                region: args.region,
                endpoint_url: args.endpoint_url,
                timeout_secs: args.timeout_secs,
            },
            server: ServerConfig {
                host: args.host,
                port: args.port,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    mushroom_form::init_logger();
    let config = AppConfig::from(Args::parse());

    info!("=== Starting Mushroom Form ===");

    let registry = FieldRegistry::global();
    registry.validate().context("field registry is inconsistent")?;
    info!("Field registry ready with {} attributes", registry.len());

    let client = SageMakerClient::new(config.endpoint.clone()).context("failed to create endpoint client")?;
    let state = AppState::new(registry, RequestAdapter::new(client));

    mushroom_form::run_server(&config.server, state).await?;

    info!("=== Mushroom Form Stopped ===");
    Ok(())
}
