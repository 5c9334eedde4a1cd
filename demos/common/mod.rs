//! Shared scaffolding for the demo programs: environment loading, logging,
//! the top-level error handler, and the optional download step.

use anyhow::Context;
use leiapix::{
    acquire_access_token, Config, JobSettings, LeiaPixClient, LeiaPixError, Pipeline,
    PipelineReport, StorageStrategy,
};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

/// When set, both artifacts are downloaded into this directory.
const DOWNLOAD_DIR_VAR: &str = "LEIAPIX_DOWNLOAD_DIR";

pub fn init() {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a configuration error and exits before any request is made.
pub fn exit_on_config_error<T>(result: Result<T, LeiaPixError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error. {}", e);
            process::exit(1);
        }
    }
}

/// Runs the flow and handles every failure in one place.
pub async fn run<S: StorageStrategy>(config: &Config, storage: &S) {
    if let Err(e) = run_inner(config, storage).await {
        eprintln!("Error. Unhandled exception: {:#}", e);
        process::exit(1);
    }
}

async fn run_inner<S: StorageStrategy>(config: &Config, storage: &S) -> anyhow::Result<()> {
    println!("Acquiring access token from LeiaLogin...");
    let token = acquire_access_token(config).await?;
    println!("\nLeiaLogin AccessToken acquired.");

    let client = LeiaPixClient::new(config, &token)?;
    let report = Pipeline::new(&client, storage, JobSettings::from(config))
        .run(&mut std::io::stdout())
        .await?;

    if let Some(dir) = env::var(DOWNLOAD_DIR_VAR).ok().filter(|d| !d.is_empty()) {
        download(&client, &report, &dir)
            .await
            .with_context(|| format!("downloading results into {}", dir))?;
    }

    Ok(())
}

async fn download(
    client: &LeiaPixClient,
    report: &PipelineReport,
    dir: &str,
) -> Result<(), LeiaPixError> {
    for url in [&report.disparity.readable, &report.animation.readable] {
        let path = client.download_artifact(url, dir).await?;
        println!("\nSaved {}", path.display());
    }
    Ok(())
}
