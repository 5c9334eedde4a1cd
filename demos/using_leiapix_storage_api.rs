//! Generates a disparity map and an animation using the service's temporary
//! storage, requesting an upload URL for each result up front.
//!
//! Requires `BACKEND_CLIENT_ID` and `BACKEND_CLIENT_SECRET`.
//!
//! Usage:
//! `cargo run --example using_leiapix_storage_api`

mod common;

use leiapix::{Config, UploadUrlApi};

#[tokio::main]
async fn main() {
    common::init();

    let config = common::exit_on_config_error(Config::from_env());

    common::run(&config, &UploadUrlApi).await;
}
