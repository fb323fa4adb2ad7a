use std::sync::Arc;

use httpmock::prelude::*;

use recap::config::Settings;
use recap::present::{NoticeLevel, Notifier, SummaryPresenter, SurfaceBuffer};
use recap::session::{SessionMeta, SessionPhase, SessionWorkflow};
use recap::summary::{
    build_delivery_chain, build_request, DeliveryRoute, GeminiClient, SummaryError,
    SummaryProvider,
};
use recap::transcript::{TranscriptStore, Utterance};

#[derive(Default)]
struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}

fn seeded_store() -> TranscriptStore {
    let store = TranscriptStore::new();
    store.append(Utterance::new("Teacher", "Welcome to Python basics"));
    store.append(Utterance::new("Student", "What is a variable?"));
    store
}

fn gemini_settings(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.llm.api_key = "test-key".to_string();
    settings.llm.endpoint = server.url("");
    settings.llm.timeout_secs = 5;
    settings.backend.timeout_secs = 5;
    settings
}

fn gemini_client(server: &MockServer) -> GeminiClient {
    GeminiClient::from_settings(&gemini_settings(server)).expect("client should build")
}

#[tokio::test]
async fn concatenates_all_fragments_of_first_candidate() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "A" }, { "text": "B" } ] } },
                    { "content": { "parts": [ { "text": "ignored" } ] } }
                ]
            }));
        })
        .await;

    let request = build_request(&seeded_store().snapshot()).expect("request should build");
    let summary = gemini_client(&server)
        .summarize(&request)
        .await
        .expect("summarize should succeed");

    assert_eq!(summary, "AB");
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_a_provider_error_with_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent");
            then.status(500).body("internal error");
        })
        .await;

    let request = build_request(&seeded_store().snapshot()).expect("request should build");
    let error = gemini_client(&server)
        .summarize(&request)
        .await
        .expect_err("summarize should fail");

    assert!(matches!(error, SummaryError::Provider { status: 500, .. }));
    assert!(error.to_string().contains("500"));
}

#[tokio::test]
async fn success_without_candidates_is_malformed_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(serde_json::json!({}));
        })
        .await;

    let request = build_request(&seeded_store().snapshot()).expect("request should build");
    let error = gemini_client(&server)
        .summarize(&request)
        .await
        .expect_err("summarize should fail");

    assert!(matches!(error, SummaryError::MalformedResponse(_)));
}

#[tokio::test]
async fn transport_error_never_exposes_the_api_key() {
    // Unroutable endpoint: the send fails at the network level, and the
    // request URL carries the key as a query parameter.
    let mut settings = Settings::default();
    settings.llm.api_key = "SECRET-KEY-123".to_string();
    settings.llm.endpoint = "http://127.0.0.1:9".to_string();
    settings.llm.timeout_secs = 2;
    let client = GeminiClient::from_settings(&settings).expect("client should build");

    let request = build_request(&seeded_store().snapshot()).expect("request should build");
    let error = client
        .summarize(&request)
        .await
        .expect_err("summarize should fail");

    assert!(matches!(error, SummaryError::Transport(_)));
    assert!(
        !error.to_string().contains("SECRET-KEY-123"),
        "credential leaked into user-visible error: {}",
        error
    );
}

#[tokio::test]
async fn missing_credential_fails_fast_without_network_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("generateContent");
            then.status(200);
        })
        .await;

    let mut settings = gemini_settings(&server);
    settings.llm.api_key = String::new();
    let client = GeminiClient::from_settings(&settings).expect("client should build");

    let request = build_request(&seeded_store().snapshot()).expect("request should build");
    let error = client
        .summarize(&request)
        .await
        .expect_err("summarize should fail");

    assert!(matches!(error, SummaryError::CredentialMissing(_)));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn relay_route_takes_over_after_primary_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains("generateContent");
            then.status(503).body("overloaded");
        })
        .await;
    let relay = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate-summary/")
                .header("X-CSRFToken", "csrf-tok");
            then.status(200)
                .json_body(serde_json::json!({ "summary": "**Summary**\n- via backend" }));
        })
        .await;

    let mut settings = gemini_settings(&server);
    settings.backend.base_url = server.url("");
    let meta = SessionMeta {
        session_id: "sess-1".to_string(),
        room_name: "room-1".to_string(),
        csrf_token: "csrf-tok".to_string(),
    };

    let chain = build_delivery_chain(&settings, &meta).expect("chain should build");
    assert_eq!(chain[1].route(), DeliveryRoute::BackendRelay);

    let surface = SurfaceBuffer::new();
    let mut presenter = SummaryPresenter::new(Arc::new(SilentNotifier));
    presenter.add_surface(surface.clone());

    // Persistence deliberately absent so the only backend POST is the relay.
    let workflow = SessionWorkflow::new(seeded_store(), chain, presenter, None, false);
    workflow.request_summary().await;

    assert_eq!(workflow.phase(), SessionPhase::Displayed);
    assert!(surface.content().contains("via backend"));
    relay.assert_async().await;
}

#[tokio::test]
async fn end_to_end_displays_summary_and_persists_once() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains("generateContent");
            then.status(200).json_body(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "**Summary**\n- Python basics" } ] } }
                ]
            }));
        })
        .await;
    let persist = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate-summary/")
                .header("X-CSRFToken", "csrf-tok")
                .json_body_partial(
                    r#"{ "summary": "**Summary**\n- Python basics", "session_id": "sess-1", "room_name": "room-1" }"#,
                );
            then.status(200).json_body(serde_json::json!({ "success": true }));
        })
        .await;

    let mut settings = gemini_settings(&server);
    settings.backend.base_url = server.url("");
    let meta = SessionMeta {
        session_id: "sess-1".to_string(),
        room_name: "room-1".to_string(),
        csrf_token: "csrf-tok".to_string(),
    };

    let panel = SurfaceBuffer::new();
    let modal = SurfaceBuffer::new();
    let mut presenter = SummaryPresenter::new(Arc::new(SilentNotifier));
    presenter.add_surface(panel.clone());
    presenter.add_surface(modal.clone());

    let workflow = SessionWorkflow::from_settings(&settings, &meta, presenter)
        .expect("workflow should build");
    workflow.observe_utterance(Utterance::new("Teacher", "Welcome to Python basics"));
    workflow.observe_utterance(Utterance::new("Student", "What is a variable?"));

    workflow.request_summary().await;

    assert_eq!(workflow.phase(), SessionPhase::Displayed);
    assert!(panel.content().contains("<strong>Summary</strong>"));
    assert!(panel.content().contains("<br>"));
    assert_eq!(panel.content(), modal.content());
    persist.assert_async().await;
}

#[tokio::test]
async fn persistence_failure_keeps_summary_displayed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains("generateContent");
            then.status(200).json_body(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "**Summary**\n- still shown" } ] } }
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate-summary/");
            then.status(500).body("backend down");
        })
        .await;

    let mut settings = gemini_settings(&server);
    settings.backend.base_url = server.url("");

    let surface = SurfaceBuffer::new();
    let mut presenter = SummaryPresenter::new(Arc::new(SilentNotifier));
    presenter.add_surface(surface.clone());

    let workflow =
        SessionWorkflow::from_settings(&settings, &SessionMeta::default(), presenter)
            .expect("workflow should build");
    workflow.observe_utterance(Utterance::new("Teacher", "Welcome to Python basics"));
    workflow.observe_utterance(Utterance::new("Student", "What is a variable?"));

    workflow.request_summary().await;

    assert_eq!(workflow.phase(), SessionPhase::Displayed);
    assert!(surface.content().contains("still shown"));
}
