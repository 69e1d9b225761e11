use crate::e2e::helpers;

use helpers::{TestContext, FAKE_MP3};
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_generated_audio_to_any_origin(ctx: &TestContext) {
    ctx.mock_speech_ok().await;
    ctx.client
        .post("/api/tts", &json!({ "text": "Serve me." }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let filename = ctx.generated_audio_files().remove(0);
    let response = ctx
        .client
        .get(&format!("/api/audio/{}", filename))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("access-control-allow-origin", "*");
    assert_eq!(response.body_bytes, FAKE_MP3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_audio(ctx: &TestContext) {
    let response = ctx.client.get("/api/audio/output_missing.mp3").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Audio file not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_serve_files_outside_audio_dir(ctx: &TestContext) {
    let name = format!("secret_{}.mp3", uuid::Uuid::new_v4().simple());
    let outside = ctx.audio_dir.path().parent().unwrap().join(&name);
    std::fs::write(&outside, b"secret").unwrap();

    let response = ctx
        .client
        .get(&format!("/api/audio/..%2F{}", name))
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    let _ = std::fs::remove_file(outside);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_only_the_most_recent_audio_files(ctx: &TestContext) {
    ctx.mock_speech_ok().await;

    for i in 0..(ctx.config.audio_retention + 2) {
        ctx.client
            .post("/api/tts", &json!({ "text": format!("Clip number {}.", i) }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
        // distinct modification times
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    assert_eq!(ctx.generated_audio_files().len(), ctx.config.audio_retention);
}
