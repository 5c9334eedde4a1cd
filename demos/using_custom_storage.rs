//! Generates a disparity map and an animation, storing both in an S3 bucket
//! you own.
//!
//! The service writes results through presigned PUT URLs generated locally
//! with your AWS credentials; presigned GET URLs are printed once each job
//! has finished.
//!
//! Requires `BACKEND_CLIENT_ID`, `BACKEND_CLIENT_SECRET`, `S3_BUCKET_NAME`,
//! `S3_BUCKET_REGION` and AWS credentials resolvable by the default chain.
//!
//! Usage:
//! `cargo run --example using_custom_storage`

mod common;

use leiapix::{CallerBucket, Config, S3Settings};

#[tokio::main]
async fn main() {
    common::init();

    let config = common::exit_on_config_error(Config::from_env());
    let s3_settings = common::exit_on_config_error(S3Settings::from_env());

    let storage = CallerBucket::from_settings(&s3_settings).await;
    common::run(&config, &storage).await;
}
