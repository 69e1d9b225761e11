use crate::e2e::helpers;

use helpers::{audio_validation_failure, created_talk, TestContext, PUBLIC_BASE_URL};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, ResponseTemplate,
};

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_submit_generated_audio_as_talk(ctx: &TestContext) {
    ctx.mock_speech_ok().await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .respond_with(created_talk("tlk_audio"))
        .expect(1)
        .mount(&ctx.did)
        .await;

    let response = ctx
        .client
        .post("/api/generate", &json!({ "text": "Welcome to the show." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({ "talk_id": "tlk_audio", "status": "created" }))
    );

    let submissions = ctx.talk_submissions().await;
    assert_eq!(submissions.len(), 1);

    let talk = &submissions[0];
    let audio_file = ctx.generated_audio_files().remove(0);
    assert_eq!(talk["source_url"], json!("https://cdn.test/presenter.png"));
    assert_eq!(
        talk["script"],
        json!({
            "type": "audio",
            "audio_url": format!("{}/api/audio/{}", PUBLIC_BASE_URL, audio_file)
        })
    );
    assert_eq!(talk["config"], json!({ "fluent": false, "stitch": true }));
    assert_eq!(talk["webhook"], json!(format!("{}/api/webhook", PUBLIC_BASE_URL)));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_text_once_when_audio_cannot_be_validated(ctx: &TestContext) {
    ctx.mock_speech_ok().await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .and(body_partial_json(json!({ "script": { "type": "audio" } })))
        .respond_with(audio_validation_failure())
        .expect(1)
        .mount(&ctx.did)
        .await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .and(body_partial_json(json!({ "script": { "type": "text" } })))
        .respond_with(created_talk("tlk_text"))
        .expect(1)
        .mount(&ctx.did)
        .await;

    let response = ctx
        .client
        .post("/api/generate", &json!({ "text": "Fallback please." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["talk_id"], json!("tlk_text"));

    let submissions = ctx.talk_submissions().await;
    assert_eq!(submissions.len(), 2);
    let fallback = &submissions[1];
    assert_eq!(
        fallback["script"],
        json!({ "type": "text", "input": "Fallback please." })
    );
    assert_eq!(fallback["config"], json!({ "stitch": true }));
    assert_eq!(fallback["webhook"], submissions[0]["webhook"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_fallback_failure_without_retrying_again(ctx: &TestContext) {
    ctx.mock_speech_ok().await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .and(body_partial_json(json!({ "script": { "type": "audio" } })))
        .respond_with(audio_validation_failure())
        .mount(&ctx.did)
        .await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .and(body_partial_json(json!({ "script": { "type": "text" } })))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "kind": "InsufficientCreditsError",
            "description": "not enough credits"
        })))
        .mount(&ctx.did)
        .await;

    let response = ctx
        .client
        .post("/api/generate", &json!({ "text": "No credits left." }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("text fallback");
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["details"]["kind"], json!("InsufficientCreditsError"));

    assert_eq!(ctx.talk_submissions().await.len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_fall_back_on_other_provider_errors(ctx: &TestContext) {
    ctx.mock_speech_ok().await;
    Mock::given(method("POST"))
        .and(path("/talks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "kind": "AuthorizationError",
            "description": "Unauthorized"
        })))
        .mount(&ctx.did)
        .await;

    let response = ctx
        .client
        .post("/api/generate", &json!({ "text": "Hello." }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Failed to generate avatar video");
    assert_eq!(
        response.body.as_ref().unwrap()["details"]["kind"],
        json!("AuthorizationError")
    );
    assert_eq!(ctx.talk_submissions().await.len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_generate_without_text(ctx: &TestContext) {
    let response = ctx.client.post("/api/generate", &json!({})).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No text provided");

    assert!(ctx.gtts.received_requests().await.unwrap().is_empty());
    assert!(ctx.talk_submissions().await.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fast_generate_with_embedded_voice(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/talks"))
        .respond_with(created_talk("tlk_fast"))
        .expect(1)
        .mount(&ctx.did)
        .await;

    let response = ctx
        .client
        .post("/api/fast-generate", &json!({ "text": "Quick one." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({ "talk_id": "tlk_fast", "status": "created" }))
    );

    // The relay never synthesizes on the fast path
    assert!(ctx.gtts.received_requests().await.unwrap().is_empty());
    assert!(ctx.generated_audio_files().is_empty());

    let talk = &ctx.talk_submissions().await[0];
    assert_eq!(talk["script"]["type"], json!("text"));
    assert_eq!(talk["script"]["input"], json!("Quick one."));
    assert_eq!(talk["script"]["provider"]["type"], json!("elevenlabs"));
    assert_eq!(
        talk["script"]["provider"]["voice_id"],
        json!(ctx.config.elevenlabs_voice_id)
    );
    assert_eq!(
        talk["script"]["provider"]["voice_config"]["model_id"],
        json!(ctx.config.elevenlabs_model_id)
    );
    assert_eq!(talk["config"], json!({ "fluent": true, "stitch": true }));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_truncate_fast_generate_text_to_max_chars(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/talks"))
        .respond_with(created_talk("tlk_long"))
        .mount(&ctx.did)
        .await;

    let text = "é".repeat(ctx.config.max_chars + 50);
    ctx.client
        .post("/api/fast-generate", &json!({ "text": text }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let talk = &ctx.talk_submissions().await[0];
    let input = talk["script"]["input"].as_str().unwrap();
    assert_eq!(input.chars().count(), ctx.config.max_chars);
}
