//! `filebox upload <path> --folder <id>`.

use anyhow::{Context, Result};
use filebox_core::actions;
use filebox_core::config::FileboxConfig;
use filebox_core::http::CurlTransport;
use filebox_core::notify::ConsoleNotifier;
use filebox_core::upload::{UploadRequest, Uploader};
use std::path::PathBuf;

pub async fn run_upload(
    cfg: &FileboxConfig,
    server: &str,
    api_key: String,
    path: PathBuf,
    folder_id: i64,
) -> Result<bool> {
    let uploader = Uploader::new(CurlTransport::new(cfg.connect_timeout()), server)
        .with_context(|| format!("server URL {}", server))?;
    let request = UploadRequest {
        path,
        folder_id,
        api_key,
    };
    tokio::task::spawn_blocking(move || actions::upload_file(&uploader, &request, &ConsoleNotifier))
        .await
        .context("upload task join")
}
