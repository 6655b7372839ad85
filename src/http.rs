//! The HTTP boundary: one upload/analyze endpoint plus the static
//! root document, served by actix-web with permissive CORS.
//!
//! The boundary validates the multipart upload, decodes and parses the
//! CSV payload, hands the dataset to the analyzer, and serializes the
//! report. All state is the immutable [`ServerOptions`]; the analyzer
//! itself is a pure function, so concurrent requests share nothing.

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{App, HttpResponse, HttpServer, Responder, dev::Server, get, post, web};
use futures_util::TryStreamExt;
use log::info;
use serde_json::json;

use crate::{analyze, dataset::Dataset, error::ApiError};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[get("/")]
async fn home() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/upload")]
async fn upload_csv(
    options: web::Data<ServerOptions>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (filename, bytes) = read_csv_part(payload, options.max_upload_bytes).await?;
    info!("Analyzing upload '{}' ({} byte(s))", filename, bytes.len());

    let dataset = Dataset::from_bytes(&bytes).map_err(ApiError::analysis)?;
    let insights = analyze::analyze(&dataset);
    info!(
        "Analyzed '{}': {} row(s) across {} column(s)",
        filename,
        dataset.row_count(),
        dataset.column_count()
    );

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "insights": insights,
        "message": "CSV analyzed successfully",
    })))
}

/// Finds the `file` part and buffers its bytes, enforcing the upload
/// ceiling. Parts without a filename are ordinary form fields, not
/// file uploads, and are skipped.
async fn read_csv_part(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| ApiError::Upload(err.to_string()))?
    {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);
        let is_file_part = field.name() == "file" && filename.is_some();
        if !is_file_part {
            while field
                .try_next()
                .await
                .map_err(|err| ApiError::Upload(err.to_string()))?
                .is_some()
            {}
            continue;
        }

        let filename = filename.unwrap_or_default();
        if filename.is_empty() {
            return Err(ApiError::EmptyFilename);
        }
        if !filename.ends_with(".csv") {
            return Err(ApiError::NotCsv);
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| ApiError::Upload(err.to_string()))?
        {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::Upload(format!(
                    "Upload exceeds the {max_bytes} byte limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok((filename, bytes));
    }
    Err(ApiError::MissingFilePart)
}

/// Route table shared by the real server and endpoint tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(web::scope("/api").service(upload_csv));
}

pub fn start_server(options: ServerOptions) -> std::io::Result<Server> {
    let bind = (options.host.clone(), options.port);
    let data = web::Data::new(options);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();
        App::new()
            .wrap(cors)
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run();

    Ok(server)
}
