//! HTTP surface: the static page and the current snapshot, read from disk on
//! every request.

use crate::store::SnapshotStore;
use actix_web::{App, HttpResponse, HttpServer, http::header::ContentType, web};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const INDEX_FILE: &str = "index.html";

pub struct ServeState {
    index_path: PathBuf,
    store: SnapshotStore,
}

impl ServeState {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            index_path: data_dir.join(INDEX_FILE),
            store: SnapshotStore::new(data_dir),
        }
    }
}

/// Registers `GET /` and `GET /fx_rates.json`. Other methods on these paths
/// get 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(serve_index)))
        .service(web::resource("/fx_rates.json").route(web::get().to(serve_rates)));
}

async fn serve_index(state: web::Data<ServeState>) -> HttpResponse {
    match tokio::fs::read(&state.index_path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!(error = %e, path = %state.index_path.display(), "Failed to read index page");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn serve_rates(state: web::Data<ServeState>) -> HttpResponse {
    match state.store.read_raw().await {
        Ok(Some(bytes)) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(bytes),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to read snapshot: {e:#}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Serves `data_dir` on all interfaces until the server is shut down.
pub async fn run_server(data_dir: &Path, port: u16) -> Result<()> {
    let state = web::Data::new(ServeState::new(data_dir));

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(("0.0.0.0", port))
        .with_context(|| format!("Failed to bind 0.0.0.0:{port}"))?;

    info!("Serving {} on 0.0.0.0:{}", data_dir.display(), port);
    server.run().await.context("HTTP server failed")
}
