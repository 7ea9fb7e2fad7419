//! Webhook endpoint tests.
//!
//! Drives `POST /webhook` end to end against a temp-dir store: the happy
//! path, merge and last-write-wins semantics, and every rejection class
//! (empty body, malformed JSON, missing fields) including the guarantee
//! that a rejected request never mutates the document.

use axum::http::StatusCode;
use sygnal_testing::{body_json, AlertBuilder, TestEnv};

#[tokio::test]
async fn valid_alert_updates_state_and_acknowledges_interval() {
    let env = TestEnv::new().expect("failed to create test environment");

    let payload = AlertBuilder::new().interwal("1h").kolumna("EMA").wartosc("BUY").build();
    let response = env.post_webhook(&payload).await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await.expect("response should be JSON");
    assert_eq!(body["status"], "sukces");
    assert_eq!(body["wiadomość"], "Zaktualizowano 1h");

    let document = env.read_document().await;
    assert_eq!(document.get("1h", "EMA"), Some("BUY"));
}

#[tokio::test]
async fn write_then_read_roundtrip_through_http() {
    let env = TestEnv::new().expect("failed to create test environment");

    let payload = AlertBuilder::new().interwal("1h").kolumna("EMA").wartosc("BUY").build();
    env.post_webhook(&payload).await.expect("request should complete");

    let response = env.get("/stan").await.expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await.expect("response should be JSON");
    assert_eq!(body, serde_json::json!({"1h": {"EMA": "BUY"}}));
}

#[tokio::test]
async fn second_write_to_same_pair_wins() {
    let env = TestEnv::new().expect("failed to create test environment");

    let first = AlertBuilder::new().interwal("1h").kolumna("EMA").wartosc("KUPUJ").build();
    env.post_webhook(&first).await.expect("request should complete");

    let second = AlertBuilder::new().interwal("1h").kolumna("EMA").wartosc("SPRZEDAJ").build();
    env.post_webhook(&second).await.expect("request should complete");

    let document = env.read_document().await;
    assert_eq!(document.get("1h", "EMA"), Some("SPRZEDAJ"));
}

#[tokio::test]
async fn new_column_preserves_existing_columns() {
    let env = TestEnv::new().expect("failed to create test environment");

    let first = AlertBuilder::new().interwal("1h").kolumna("EMA").wartosc("KUPUJ").build();
    env.post_webhook(&first).await.expect("request should complete");

    let second = AlertBuilder::new().interwal("1h").kolumna("RSI").wartosc("SPRZEDAJ").build();
    env.post_webhook(&second).await.expect("request should complete");

    let document = env.read_document().await;
    assert_eq!(document.get("1h", "EMA"), Some("KUPUJ"));
    assert_eq!(document.get("1h", "RSI"), Some("SPRZEDAJ"));
}

#[tokio::test]
async fn intervals_accumulate_independently() {
    let env = TestEnv::new().expect("failed to create test environment");

    for interwal in ["15m", "1h", "4h", "1d"] {
        let payload = AlertBuilder::new().interwal(interwal).build();
        let response = env.post_webhook(&payload).await.expect("request should complete");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let document = env.read_document().await;
    assert_eq!(document.interval_count(), 4);
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let env = TestEnv::new().expect("failed to create test environment");

    let response = env.post_webhook_raw("").await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(env.read_document().await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected_without_mutation() {
    let env = TestEnv::new().expect("failed to create test environment");

    let response =
        env.post_webhook_raw("{not valid json").await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await.expect("response should be JSON");
    assert_eq!(body["status"], "błąd");

    assert!(env.read_document().await.is_empty());
}

#[tokio::test]
async fn missing_required_fields_are_rejected_with_field_specific_messages() {
    let env = TestEnv::new().expect("failed to create test environment");

    let cases = [
        ("interwal", AlertBuilder::new().without_interwal().build()),
        ("kolumna", AlertBuilder::new().without_kolumna().build()),
        ("wartosc", AlertBuilder::new().without_wartosc().build()),
    ];

    for (field, payload) in cases {
        let response = env.post_webhook(&payload).await.expect("request should complete");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "field: {field}");

        let body = body_json(response).await.expect("response should be JSON");
        assert_eq!(body["status"], "błąd");
        let message = body["wiadomość"].as_str().expect("message should be a string");
        assert!(message.contains(field), "message should name `{field}`, got: {message}");
    }

    assert!(env.read_document().await.is_empty());
}

#[tokio::test]
async fn empty_field_values_are_rejected() {
    let env = TestEnv::new().expect("failed to create test environment");

    let payload = AlertBuilder::new().wartosc("").build();
    let response = env.post_webhook(&payload).await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(env.read_document().await.is_empty());
}

#[tokio::test]
async fn non_ascii_values_survive_the_roundtrip() {
    let env = TestEnv::new().expect("failed to create test environment");

    let payload =
        AlertBuilder::new().interwal("1h").kolumna("Średnia").wartosc("SPRZEDAŻ").build();
    env.post_webhook(&payload).await.expect("request should complete");

    let response = env.get("/stan").await.expect("request should complete");
    let body = body_json(response).await.expect("response should be JSON");
    assert_eq!(body["1h"]["Średnia"], "SPRZEDAŻ");

    let contents =
        std::fs::read_to_string(env.state_path()).expect("state file should be readable");
    assert!(contents.contains("SPRZEDAŻ"), "state file should keep non-ASCII verbatim");
}

#[tokio::test]
async fn webhook_rejects_get_requests() {
    let env = TestEnv::new().expect("failed to create test environment");

    let response = env.get("/webhook").await.expect("request should complete");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let env = TestEnv::new().expect("failed to create test environment");

    let response = env.get("/stan").await.expect("request should complete");

    assert!(response.headers().contains_key("x-request-id"));
}
