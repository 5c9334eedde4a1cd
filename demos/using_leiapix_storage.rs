//! Generates a disparity map and an animation, letting the service allocate
//! storage for both. The printed GET URLs are short-lived, so download the
//! results promptly (or set `LEIAPIX_DOWNLOAD_DIR`).
//!
//! Requires `BACKEND_CLIENT_ID` and `BACKEND_CLIENT_SECRET`.
//!
//! Usage:
//! `cargo run --example using_leiapix_storage`

mod common;

use leiapix::{Config, VendorManaged};

#[tokio::main]
async fn main() {
    common::init();

    let config = common::exit_on_config_error(Config::from_env());

    // Pass the disparity map from the first job into the animation job
    // instead of having it regenerated.
    let storage = VendorManaged {
        reuse_disparity: true,
    };
    common::run(&config, &storage).await;
}
