mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use common::FakeClient;
use mushroom_form::{router, AppState, FieldRegistry, RequestAdapter};
use serde_json::Value;
use tower::ServiceExt;

fn state(client: FakeClient) -> AppState<FakeClient> {
    AppState::new(FieldRegistry::global(), RequestAdapter::new(client))
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_index_renders_defaults_with_ring_type_hidden() {
    let app = router(state(FakeClient::replying("{}")));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Mushroom Data Interface</h1>"));
    assert!(html.contains("id=\"field-ring_type\" data-shown-when=\"has_ring\" hidden>"));
    assert!(html.contains("name=\"cap_diameter\" min=\"0.38\" max=\"62.34\" step=\"any\" value=\"10\""));
    assert!(html.contains("<textarea id=\"result\" readonly rows=\"3\"></textarea>"));
}

#[tokio::test]
async fn test_form_submission_renders_result() {
    let state = state(FakeClient::replying(r#"{"prediction":"edible","confidence":87.3}"#));
    let app = router(state.clone());
    let response = app
        .oneshot(form_post("cap_diameter=500&has_ring=true&ring_type=1&cap_color=5&submit=Submit"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("This mushroom is : edible, Confidence: 87.3%"));
    assert!(html.contains("id=\"field-ring_type\" data-shown-when=\"has_ring\">"));
    assert!(html.contains("value=\"62.34\""));

    let requests = state.adapter.client().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["cap_diameter"], 62.34);
    assert_eq!(requests[0]["has_ring"], 1);
    assert_eq!(requests[0]["ring_type"], 1);
    assert_eq!(requests[0]["cap_color"], 5);
    assert_eq!(requests[0]["does_bruise_bleed"], 0);
}

#[tokio::test]
async fn test_unchecked_ring_sends_sentinel() {
    let state = state(FakeClient::replying(r#"{"prediction":"edible","confidence":51.0}"#));
    let app = router(state.clone());
    let response = app.oneshot(form_post("ring_type=6")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = state.adapter.client().requests();
    assert_eq!(requests[0]["ring_type"], 4);
    assert_eq!(requests[0]["has_ring"], 0);
}

#[tokio::test]
async fn test_remote_failure_is_rendered_not_raised() {
    let app = router(state(FakeClient::failing("Could not connect to the endpoint URL")));
    let response = app.oneshot(form_post("has_ring=on")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("System Error: Could not connect to the endpoint URL"));
}

#[tokio::test]
async fn test_invalid_form_input_is_a_bad_request() {
    let state = state(FakeClient::replying("{}"));
    let app = router(state.clone());
    let response = app.oneshot(form_post("cap_color=99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Invalid input: Code 99 is not a valid choice for cap_color"));
    assert!(state.adapter.client().requests().is_empty());
}

#[tokio::test]
async fn test_rejected_form_keeps_entered_values() {
    let app = router(state(FakeClient::replying("{}")));
    let response = app
        .oneshot(form_post("cap_color=99&cap_diameter=20&has_ring=true&season=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("name=\"cap_diameter\" min=\"0.38\" max=\"62.34\" step=\"any\" value=\"20\""));
    assert!(html.contains("name=\"has_ring\" value=\"true\" checked>"));
    assert!(html.contains("<option value=\"0\" selected>winter</option>"));
    assert!(html.contains("id=\"field-ring_type\" data-shown-when=\"has_ring\">"));
}

#[tokio::test]
async fn test_json_hidden_ring_type_accepts_sentinel() {
    let state = state(FakeClient::replying(r#"{"prediction":"edible","confidence":64.2}"#));
    let app = router(state.clone());
    let response = app
        .oneshot(json_post("/api/classify", r#"{"has_ring": false, "ring_type": 4}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["result"], "This mushroom is : edible, Confidence: 64.2%");
    assert_eq!(state.adapter.client().requests()[0]["ring_type"], 4);
}

#[tokio::test]
async fn test_malformed_json_body_is_a_json_error() {
    let state = state(FakeClient::replying("{}"));
    let app = router(state.clone());
    let response = app.oneshot(json_post("/api/classify", "{\"has_ring\": ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(state.adapter.client().requests().is_empty());
}

#[tokio::test]
async fn test_json_classification() {
    let app = router(state(FakeClient::replying(r#"{"prediction":"poisonous"}"#)));
    let response = app
        .oneshot(json_post("/api/classify", r#"{"has_ring": true, "ring_type": "zone", "season": 0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["result"], "This mushroom is : poisonous, Confidence: 0.0%");
    assert_eq!(body["status"], "prediction");
    assert_eq!(body["label"], "poisonous");
}

#[tokio::test]
async fn test_json_rejects_unknown_attributes() {
    let app = router(state(FakeClient::replying("{}")));
    let response = app
        .oneshot(json_post("/api/classify", r#"{"spore_count": 3}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "Unknown attribute: spore_count");
}

#[tokio::test]
async fn test_fields_listing() {
    let app = router(state(FakeClient::replying("{}")));
    let response = app
        .oneshot(Request::builder().uri("/api/fields").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let attributes = body["attributes"].as_array().unwrap();
    assert_eq!(attributes.len(), 19);
    assert_eq!(attributes[0]["name"], "cap_diameter");
    assert_eq!(attributes[0]["kind"], "continuous");
    assert_eq!(attributes[16]["name"], "ring_type");
    assert_eq!(attributes[16]["shown_when"], "has_ring");
    assert_eq!(attributes[9]["choices"][0]["label"], "brown");
    assert_eq!(attributes[9]["choices"][0]["code"], 2);
}

#[tokio::test]
async fn test_health() {
    let app = router(state(FakeClient::replying("{}")));
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
