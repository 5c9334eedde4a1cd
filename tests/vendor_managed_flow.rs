mod common;

use common::{config_for, json_body, mount_token, requests_to, IMAGE_URL};
use leiapix::{LeiaPixError, VendorManaged};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_jobs(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/disparity"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resultPresignedUrl": "https://x/d.jpg"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/animation"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resultPresignedUrl": "https://x/a.mp4"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_vendor_managed_prints_both_urls() {
    let server = MockServer::start().await;
    mount_token(&server, "tok123").await;
    mount_jobs(&server).await;

    let (result, output) = common::run_flow(&config_for(&server), &VendorManaged::default()).await;
    let report = result.unwrap();

    assert_eq!(report.disparity.readable, "https://x/d.jpg");
    assert_eq!(report.animation.readable, "https://x/a.mp4");
    assert_eq!(report.disparity.writable, None);
    assert_eq!(report.animation.writable, None);
    assert!(output.contains("To view it, use this GET URL: https://x/d.jpg"));
    assert!(output.contains("To download, please use this GET URL: https://x/a.mp4"));

    let disparity = json_body(&requests_to(&server, "/api/v1/disparity").await[0]);
    assert_eq!(disparity["inputImageUrl"], json!(IMAGE_URL));
    assert!(disparity.get("resultPresignedUrl").is_none());

    let animation = json_body(&requests_to(&server, "/api/v1/animation").await[0]);
    assert_eq!(animation["inputDisparityUrl"], json!("https://x/d.jpg"));
    assert_eq!(animation["animationLength"], json!(5));
    assert!(animation.get("resultPresignedUrl").is_none());
    assert_ne!(animation["correlationId"], disparity["correlationId"]);
}

#[tokio::test]
async fn test_vendor_managed_without_disparity_reuse() {
    let server = MockServer::start().await;
    mount_token(&server, "tok123").await;
    mount_jobs(&server).await;

    let storage = VendorManaged {
        reuse_disparity: false,
    };
    let (result, output) = common::run_flow(&config_for(&server), &storage).await;
    let report = result.unwrap();

    assert_eq!(report.animation.readable, "https://x/a.mp4");
    assert!(output.contains("https://x/a.mp4"));

    let animation = json_body(&requests_to(&server, "/api/v1/animation").await[0]);
    assert!(animation.get("inputDisparityUrl").is_none());
}

#[tokio::test]
async fn test_failed_disparity_skips_animation() {
    let server = MockServer::start().await;
    mount_token(&server, "tok123").await;

    Mock::given(method("POST"))
        .and(path("/api/v1/disparity"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/animation"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (result, output) = common::run_flow(&config_for(&server), &VendorManaged::default()).await;

    assert!(matches!(
        result,
        Err(LeiaPixError::ApiError { status: 500, .. })
    ));
    assert!(!output.contains("Generating mp4 animation"));
}

#[tokio::test]
async fn test_missing_result_url_is_an_error() {
    let server = MockServer::start().await;
    mount_token(&server, "tok123").await;

    Mock::given(method("POST"))
        .and(path("/api/v1/disparity"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (result, _) = common::run_flow(&config_for(&server), &VendorManaged::default()).await;

    assert!(matches!(
        result,
        Err(LeiaPixError::MissingResultUrl { kind: "Disparity" })
    ));
    assert!(requests_to(&server, "/api/v1/animation").await.is_empty());
}

#[tokio::test]
async fn test_animation_length_comes_from_config() {
    let server = MockServer::start().await;
    mount_token(&server, "tok123").await;
    mount_jobs(&server).await;

    let config = leiapix::Config::from_lookup(common::lookup_for(
        &server,
        &[(leiapix::config::ANIMATION_LENGTH_VAR, "8")],
    ))
    .unwrap();
    let (result, _) = common::run_flow(&config, &VendorManaged::default()).await;
    assert!(result.is_ok());

    let animation = json_body(&requests_to(&server, "/api/v1/animation").await[0]);
    assert_eq!(animation["animationLength"], json!(8));
}
