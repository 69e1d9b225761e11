use crate::e2e::helpers;

use helpers::{TestContext, FAKE_MP3, PUBLIC_BASE_URL};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_text_to_a_served_audio_file(ctx: &TestContext) {
    ctx.mock_speech_ok().await;

    let response = ctx
        .client
        .post("/api/tts", &json!({ "text": "Hello there. This is a test." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], json!(true));
    assert!(body.get("timing").is_none(), "basic provider has no timing");

    let audio_url = body["audio_url"].as_str().unwrap();
    let prefix = format!("{}/api/audio/output_", PUBLIC_BASE_URL);
    assert!(audio_url.starts_with(&prefix), "unexpected url {}", audio_url);
    assert!(audio_url.ends_with(".mp3"));

    let files = ctx.generated_audio_files();
    assert_eq!(files.len(), 1);
    assert!(audio_url.ends_with(&files[0]));

    let saved = std::fs::read(ctx.audio_dir.path().join(&files[0])).unwrap();
    assert_eq!(saved, FAKE_MP3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_text_without_calling_provider(ctx: &TestContext) {
    ctx.mock_speech_ok().await;

    let response = ctx.client.post("/api/tts", &json!({})).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No text provided");

    let calls = ctx.gtts.received_requests().await.unwrap();
    assert!(calls.is_empty());
    assert!(ctx.generated_audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts", &json!({ "text": "   \n\t " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No text provided");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/tts", "application/json", "{\"text\": ")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid request body");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_provider_failure_as_server_error(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&ctx.gtts)
        .await;

    let response = ctx
        .client
        .post("/api/tts", &json!({ "text": "Hello" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Speech synthesis failed");
    assert!(ctx.generated_audio_files().is_empty());
}
