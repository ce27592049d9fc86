use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use tokio::net::TcpListener;

mod form;
mod handlers;

pub use form::{render_page, PAGE_TITLE, RESULT_LABEL};
pub use handlers::{AppError, ClassifyResponse};

use crate::adapter::RequestAdapter;
use crate::config::ServerConfig;
use crate::registry::FieldRegistry;
use crate::remote::InferenceClient;

/// Shared, immutable state of the web front-end.
pub struct AppState<C> {
    pub registry: &'static FieldRegistry,
    pub adapter: Arc<RequestAdapter<C>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<C: InferenceClient> AppState<C> {
    pub fn new(registry: &'static FieldRegistry, adapter: RequestAdapter<C>) -> Self {
        Self {
            registry,
            adapter: Arc::new(adapter),
        }
    }
}

/// Routes of the form front-end and its small JSON API.
pub fn router<C>(state: AppState<C>) -> Router
where
    C: InferenceClient + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::index::<C>).post(handlers::submit_form::<C>))
        .route("/api/classify", post(handlers::classify_json::<C>))
        .route("/api/fields", get(handlers::fields::<C>))
        .route("/api/health", get(handlers::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();
    let response = next.run(request).await;
    info!("{} {} -> {} ({:.2?})", method, uri, response.status(), started.elapsed());
    response
}

/// Serves the form until Ctrl-C.
pub async fn run_server<C>(config: &ServerConfig, state: AppState<C>) -> Result<()>
where
    C: InferenceClient + Send + Sync + 'static,
{
    let app = router(state);
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Form available on http://{}/", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C, serving until killed: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl-C, shutting down gracefully...");
}
