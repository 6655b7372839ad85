use clap::Parser;

use crate::http::{DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Analyze uploaded CSV datasets over HTTP",
    long_about = None
)]
pub struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Maximum accepted upload size in bytes
    #[arg(long = "max-upload-bytes", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}
