use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::Form;
use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use super::form::render_page;
use super::AppState;
use crate::adapter::ClassificationResult;
use crate::registry::{FieldRegistry, RecordError, SpecimenRecord};
use crate::remote::InferenceClient;

/// Errors answered directly by the web layer.
#[derive(Debug)]
pub enum AppError {
    InvalidSpecimen(RecordError),
    MalformedBody(JsonRejection),
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        AppError::InvalidSpecimen(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidSpecimen(e) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
            AppError::MalformedBody(rejection) => (
                rejection.status(),
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// Text shown in the result area
    pub result: String,
    #[serde(flatten)]
    pub outcome: ClassificationResult,
}

pub async fn index<C>(State(state): State<AppState<C>>) -> Html<String>
where
    C: InferenceClient + Send + Sync + 'static,
{
    let record = SpecimenRecord::new(state.registry);
    Html(render_page(&record, None))
}

pub async fn submit_form<C>(
    State(state): State<AppState<C>>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>)
where
    C: InferenceClient + Send + Sync + 'static,
{
    let record = match SpecimenRecord::from_form(state.registry, &fields) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            let record = SpecimenRecord::from_form_lossy(state.registry, &fields);
            let message = format!("Invalid input: {}", e);
            return (StatusCode::BAD_REQUEST, Html(render_page(&record, Some(&message))));
        }
    };

    let payload = state.adapter.build_payload(&record);
    let result = state.adapter.classify(&payload).await;
    (StatusCode::OK, Html(render_page(&record, Some(&result.to_string()))))
}

pub async fn classify_json<C>(
    State(state): State<AppState<C>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, AppError>
where
    C: InferenceClient + Send + Sync + 'static,
{
    let Json(object) = body.map_err(|rejection| {
        warn!("Rejected classification request body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;
    let record = SpecimenRecord::from_json(state.registry, &object).map_err(|e| {
        warn!("Rejected classification request: {}", e);
        AppError::from(e)
    })?;
    let outcome = state.adapter.submit(&record).await;
    Ok(Json(ClassifyResponse {
        result: outcome.to_string(),
        outcome,
    }))
}

pub async fn fields<C>(State(state): State<AppState<C>>) -> Json<&'static FieldRegistry>
where
    C: InferenceClient + Send + Sync + 'static,
{
    Json(state.registry)
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
