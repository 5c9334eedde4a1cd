//! A Rust client for the LeiaPix Media Cloud API.
//!
//! The service turns a single photo into a disparity (depth) map and then into
//! a short animated video. This crate handles the whole round trip:
//! authenticating with an OAuth2 client-credentials grant, arranging where the
//! results are stored, submitting both jobs, and reporting the download links.
//!
//! ## Features
//! - Client-credentials token acquisition against Leia Login.
//! - Disparity and animation job requests with typed request bodies.
//! - Three interchangeable storage strategies behind [`StorageStrategy`]:
//!   a caller-owned S3 bucket, the upload-URL API, or fully vendor-managed storage.
//! - Download helper for generated artifacts.
//! - Typed error handling through [`LeiaPixError`].
//!
//! ```no_run
//! # use leiapix::{
//! #     acquire_access_token, Config, JobSettings, LeiaPixClient, Pipeline, VendorManaged,
//! # };
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let token = acquire_access_token(&config).await?;
//! let client = LeiaPixClient::new(&config, &token)?;
//!
//! let storage = VendorManaged::default();
//! let report = Pipeline::new(&client, &storage, JobSettings::from(&config))
//!     .run(&mut std::io::stdout())
//!     .await?;
//! println!("{}", report.animation.readable);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use auth::acquire_access_token;
pub use client::LeiaPixClient;
pub use config::{Config, S3Settings};
pub use error::LeiaPixError;
pub use pipeline::{JobSettings, Pipeline};
pub use storage::{CallerBucket, StorageStrategy, UploadUrlApi, VendorManaged};
pub use types::*;
