use super::*;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{domain::FieldName, error::CONNECTIVITY_FAILURE_MESSAGE};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct RecordedRequest {
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct ServiceState {
    reply_status: StatusCode,
    reply_body: String,
    received: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn handle_predict(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    state.received.lock().await.push(RecordedRequest {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });
    (
        state.reply_status,
        [(CONTENT_TYPE, "application/json")],
        state.reply_body.clone(),
    )
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "Crop prediction API running" }))
}

async fn spawn_prediction_service(
    reply_status: StatusCode,
    reply_body: &str,
) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServiceState {
        reply_status,
        reply_body: reply_body.to_string(),
        received: Arc::clone(&received),
    };
    let app = Router::new()
        .route("/", get(handle_health))
        .route("/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), received)
}

async fn unreachable_service_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

fn client_for(service_url: &str) -> HttpPredictionClient {
    HttpPredictionClient::new(
        ServiceEndpoint::parse(service_url, DEFAULT_PREDICT_PATH).expect("endpoint"),
    )
}

#[test]
fn endpoint_appends_predict_path_to_base() {
    let endpoint = ServiceEndpoint::parse("http://127.0.0.1:5000/", "/predict").expect("parse");
    assert_eq!(endpoint.predict_url().as_str(), "http://127.0.0.1:5000/predict");
    assert_eq!(endpoint.health_url().as_str(), "http://127.0.0.1:5000/");

    let prefixed = ServiceEndpoint::parse("https://crops.example/api", "predict").expect("parse");
    assert_eq!(
        prefixed.predict_url().as_str(),
        "https://crops.example/api/predict"
    );
}

#[test]
fn endpoint_rejects_invalid_urls() {
    assert!(matches!(
        ServiceEndpoint::parse("not a url", "/predict"),
        Err(EndpointError::InvalidUrl { .. })
    ));
    assert!(matches!(
        ServiceEndpoint::parse("ftp://crops.example", "/predict"),
        Err(EndpointError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));
}

#[tokio::test]
async fn prediction_response_resolves_success() {
    let (url, received) =
        spawn_prediction_service(StatusCode::OK, r#"{"prediction":"rice"}"#).await;
    let client = client_for(&url);
    let mut controller = FormController::new();
    controller.update_field(FieldName::Nitrogen, "90");

    let result = controller.submit(&client).await;

    assert_eq!(result, &ResultState::Success("rice".into()));
    assert_eq!(result.failure_message(), None);
    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].content_type.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn service_error_is_shown_verbatim() {
    let (url, _received) = spawn_prediction_service(
        StatusCode::BAD_REQUEST,
        r#"{"error":"invalid humidity"}"#,
    )
    .await;
    let client = client_for(&url);
    let mut controller = FormController::new();

    let result = controller.submit(&client).await;

    assert_eq!(result, &ResultState::Failure("invalid humidity".into()));
    assert_eq!(result.crop(), None);
}

#[tokio::test]
async fn connection_refused_uses_connectivity_message() {
    let client = client_for(&unreachable_service_url().await);
    let mut controller = FormController::new();

    let result = controller.submit(&client).await;

    assert_eq!(
        result,
        &ResultState::Failure(CONNECTIVITY_FAILURE_MESSAGE.into())
    );
    assert!(!controller.is_pending());
}

#[tokio::test]
async fn non_json_body_uses_connectivity_message() {
    let (url, _received) =
        spawn_prediction_service(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let client = client_for(&url);

    let err = client
        .predict(&Draft::new().to_payload())
        .await
        .expect_err("html body");

    assert!(matches!(err, PredictionError::MalformedBody(_)));
    assert_eq!(err.user_message(), CONNECTIVITY_FAILURE_MESSAGE);
}

#[tokio::test]
async fn empty_draft_sends_every_field_as_null() {
    let (url, received) =
        spawn_prediction_service(StatusCode::BAD_REQUEST, r#"{"error":"Input contains NaN"}"#)
            .await;
    let client = client_for(&url);
    let mut controller = FormController::new();

    controller.submit(&client).await;

    let received = received.lock().await;
    let body = received[0].body.as_object().expect("json object");
    assert_eq!(body.len(), 7);
    for name in FieldName::ALL {
        assert_eq!(body.get(name.as_str()), Some(&Value::Null), "{name}");
    }
}

#[tokio::test]
async fn ph_is_sent_as_a_number() {
    let (url, received) =
        spawn_prediction_service(StatusCode::OK, r#"{"prediction":"chickpea"}"#).await;
    let client = client_for(&url);
    let mut controller = FormController::new();
    controller.update_field(FieldName::Ph, "6.5");

    controller.submit(&client).await;

    let received = received.lock().await;
    assert_eq!(received[0].body["ph"], json!(6.5));
    assert!(received[0].body["ph"].is_number());
}

#[tokio::test]
async fn health_check_reports_service_status() {
    let (url, _received) = spawn_prediction_service(StatusCode::OK, "{}").await;

    let status = client_for(&url).health().await.expect("health");

    assert_eq!(status, "Crop prediction API running");
}

#[tokio::test]
async fn health_check_against_unreachable_service_is_connectivity_failure() {
    let err = client_for(&unreachable_service_url().await)
        .health()
        .await
        .expect_err("unreachable");

    assert!(err.is_connectivity());
}
