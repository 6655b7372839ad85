pub mod analyze;
pub mod classify;
pub mod cli;
pub mod data;
pub mod dataset;
pub mod error;
pub mod http;
pub mod report;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{cli::Cli, http::ServerOptions};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_insight", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub async fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let options = ServerOptions {
        host: cli.host,
        port: cli.port,
        max_upload_bytes: cli.max_upload_bytes,
    };
    info!(
        "Serving CSV insight API on http://{}:{} (upload limit {} byte(s))",
        options.host, options.port, options.max_upload_bytes
    );
    let bind_label = format!("{}:{}", options.host, options.port);
    let server = http::start_server(options)
        .with_context(|| format!("Binding http://{bind_label}"))?;
    server.await.context("Running HTTP server")?;
    Ok(())
}
