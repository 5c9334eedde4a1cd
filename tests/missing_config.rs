mod common;

use leiapix::config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR, S3_BUCKET_NAME_VAR};
use leiapix::{Config, LeiaPixError, S3Settings};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spy_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_missing_credentials_makes_no_requests() {
    let server = spy_server().await;

    let lookup = common::lookup_for(&server, &[(CLIENT_SECRET_VAR, "")]);
    let err = Config::from_lookup(lookup).unwrap_err();

    assert!(err.is_config());
    assert!(err.to_string().contains(CLIENT_SECRET_VAR));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_bucket_makes_no_requests() {
    let server = spy_server().await;

    let config = Config::from_lookup(common::lookup_for(&server, &[]));
    assert!(config.is_ok());

    let err = S3Settings::from_lookup(common::lookup_for(&server, &[])).unwrap_err();

    assert!(matches!(
        err,
        LeiaPixError::MissingConfig { var: S3_BUCKET_NAME_VAR, .. }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_client_id_message() {
    let server = spy_server().await;

    let err =
        Config::from_lookup(common::lookup_for(&server, &[(CLIENT_ID_VAR, "")])).unwrap_err();

    assert_eq!(
        err.to_string(),
        "In order to authenticate against Leia Media Cloud API, you need to provide \
         BACKEND_CLIENT_ID and BACKEND_CLIENT_SECRET env vars (missing BACKEND_CLIENT_ID)"
    );
}
