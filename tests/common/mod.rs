#![allow(dead_code)]

use leiapix::config::{
    API_URL_VAR, CLIENT_ID_VAR, CLIENT_SECRET_VAR, ORIGINAL_IMAGE_URL_VAR, TOKEN_URL_VAR,
};
use leiapix::{
    acquire_access_token, Config, JobSettings, LeiaPixClient, LeiaPixError, Pipeline,
    PipelineReport, StorageStrategy,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const IMAGE_URL: &str = "https://images.example.com/photo.jpeg";
pub const TOKEN_PATH: &str = "/auth/realms/leialoft/protocol/openid-connect/token";

pub fn lookup_for(
    server: &MockServer,
    extra: &[(&str, &str)],
) -> impl Fn(&str) -> Option<String> {
    let mut map: HashMap<String, String> = HashMap::new();
    map.insert(CLIENT_ID_VAR.to_string(), "client-id".to_string());
    map.insert(CLIENT_SECRET_VAR.to_string(), "client-secret".to_string());
    map.insert(ORIGINAL_IMAGE_URL_VAR.to_string(), IMAGE_URL.to_string());
    map.insert(API_URL_VAR.to_string(), server.uri());
    map.insert(TOKEN_URL_VAR.to_string(), format!("{}{}", server.uri(), TOKEN_PATH));
    for (key, value) in extra {
        map.insert(key.to_string(), value.to_string());
    }
    move |key| map.get(key).cloned()
}

pub fn config_for(server: &MockServer) -> Config {
    Config::from_lookup(lookup_for(server, &[])).unwrap()
}

pub async fn mount_token(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "expires_in": 300,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

/// Authenticates, builds the client and runs the pipeline, capturing what
/// would have been printed to stdout.
pub async fn run_flow<S: StorageStrategy>(
    config: &Config,
    storage: &S,
) -> (Result<PipelineReport, LeiaPixError>, String) {
    let mut out = Vec::new();
    let result: Result<PipelineReport, LeiaPixError> = async {
        let token = acquire_access_token(config).await?;
        let client = LeiaPixClient::new(config, &token)?;
        Pipeline::new(&client, storage, JobSettings::from(config))
            .run(&mut out)
            .await
    }
    .await;
    (result, String::from_utf8(out).unwrap())
}

pub async fn requests_to(server: &MockServer, endpoint: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == endpoint)
        .collect()
}

pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

pub fn query_value(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
