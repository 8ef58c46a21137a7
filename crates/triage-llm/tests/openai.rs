//! `OpenAiBackend` against a local Chat Completions stand-in.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use triage_core::models::triage::Urgency;
use triage_core::traits::TriageClassifier;
use triage_llm::backend::ChatBackend;
use triage_llm::classifier::LlmClassifier;
use triage_llm::error::LlmError;
use triage_llm::openai::OpenAiBackend;
use triage_llm::prompt::TRIAGE_SYSTEM_PROMPT;

const COMPLETIONS: &str = "/v1/chat/completions";

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<(Option<String>, Value)>>>);

async fn record_and_answer(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.0.lock().unwrap().push((auth, body));
    Json(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "{\"symptoms\":[\"headache\"],\"duration\":\"\",\"age\":\"\",\"red_flags\":[],\"urgency\":\"LOW\"}"
            }
        }]
    }))
}

fn answering(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        COMPLETIONS,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn backend(base_url: &str, timeout: Duration) -> OpenAiBackend {
    OpenAiBackend::new("sk-test", "gpt-test", timeout)
        .unwrap()
        .with_base_url(base_url)
}

#[tokio::test]
async fn sends_json_mode_request_with_bearer_auth() {
    let captured = Captured::default();
    let router = Router::new()
        .route(COMPLETIONS, post(record_and_answer))
        .with_state(captured.clone());
    let base_url = serve(router).await;

    let text = backend(&format!("{base_url}/"), Duration::from_secs(5))
        .complete(TRIAGE_SYSTEM_PROMPT, "I have a headache")
        .await
        .unwrap();
    assert!(text.contains("\"urgency\":\"LOW\""));

    let requests = captured.0.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], TRIAGE_SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "I have a headache");
}

#[tokio::test]
async fn non_success_status_keeps_code_and_body() {
    let router = Router::new().route(
        COMPLETIONS,
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let base_url = serve(router).await;

    let err = backend(&base_url, Duration::from_secs(5))
        .complete(TRIAGE_SYSTEM_PROMPT, "hello")
        .await
        .unwrap_err();

    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_a_parse_error() {
    let base_url = serve(answering(StatusCode::OK, json!({ "choices": [] }))).await;

    let err = backend(&base_url, Duration::from_secs(5))
        .complete(TRIAGE_SYSTEM_PROMPT, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ResponseParse(_)), "{err:?}");
}

#[tokio::test]
async fn null_content_is_a_parse_error() {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    });
    let base_url = serve(answering(StatusCode::OK, body)).await;

    let err = backend(&base_url, Duration::from_secs(5))
        .complete(TRIAGE_SYSTEM_PROMPT, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ResponseParse(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_completion_body_is_a_parse_error() {
    let base_url = serve(answering(StatusCode::OK, json!({ "unexpected": true }))).await;

    let err = backend(&base_url, Duration::from_secs(5))
        .complete(TRIAGE_SYSTEM_PROMPT, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ResponseParse(_)), "{err:?}");
}

#[tokio::test]
async fn slow_provider_hits_the_request_timeout() {
    let router = Router::new().route(
        COMPLETIONS,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "choices": [] }))
        }),
    );
    let base_url = serve(router).await;

    let started = std::time::Instant::now();
    let err = backend(&base_url, Duration::from_millis(200))
        .complete(TRIAGE_SYSTEM_PROMPT, "hello")
        .await
        .unwrap_err();

    match err {
        LlmError::Http(e) => assert!(e.is_timeout(), "{e:?}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn provider_failure_falls_back_to_keywords() {
    let base_url = serve(answering(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "overloaded" } }),
    ))
    .await;
    let classifier = LlmClassifier::new(Arc::new(backend(&base_url, Duration::from_secs(5))));

    let result = classifier
        .classify("Sudden chest pain and difficulty breathing", &[])
        .await;
    assert_eq!(result.urgency, Urgency::High);
    assert_eq!(
        result.symptoms,
        vec!["Sudden chest pain and difficulty breathing".to_string()]
    );
}
