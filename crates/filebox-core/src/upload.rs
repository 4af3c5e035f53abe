//! File upload into a folder of the storage service.
//!
//! `POST {server}/upload` as multipart form field `file`, with the target
//! folder in `X-Folder-ID` and the API key in `access_token`. The server
//! answers 2xx and, on success, `HX-Trigger: {"upload" : "success"}`.

use crate::http::{base_url, HttpTransport, TransportError, ACCESS_TOKEN_HEADER};
use std::path::{Path, PathBuf};
use url::Url;

pub const FOLDER_ID_HEADER: &str = "X-Folder-ID";
const FORM_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub folder_id: i64,
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid upload URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("network: {0}")]
    Network(#[from] TransportError),
    #[error("Error: {status_text}")]
    HttpStatus { status: u32, status_text: String },
}

#[derive(Debug, Clone)]
pub struct Uploader<T> {
    transport: T,
    base_url: Url,
}

impl<T: HttpTransport> Uploader<T> {
    pub fn new(transport: T, server_url: &str) -> Result<Self, UploadError> {
        Ok(Self {
            transport,
            base_url: base_url(server_url)?,
        })
    }

    pub fn upload_url(&self) -> Result<Url, UploadError> {
        Ok(self.base_url.join("upload")?)
    }

    pub fn upload(&self, request: &UploadRequest) -> Result<(), UploadError> {
        check_regular_file(&request.path)?;
        let url = self.upload_url()?;
        let folder = request.folder_id.to_string();
        let headers = [
            (ACCESS_TOKEN_HEADER, request.api_key.as_str()),
            (FOLDER_ID_HEADER, folder.as_str()),
        ];
        let response = self
            .transport
            .post_file(url.as_str(), &headers, FORM_FIELD, &request.path)?;

        if !response.is_success() {
            tracing::warn!("POST {} returned HTTP {}", url, response.status);
            return Err(UploadError::HttpStatus {
                status: response.status,
                status_text: response.status_message(),
            });
        }
        match response.header("HX-Trigger") {
            Some(trigger) if !trigger_reports_success(trigger) => {
                tracing::warn!("upload accepted but trigger was {:?}", trigger)
            }
            _ => {}
        }
        tracing::info!(
            "uploaded {} to folder {}",
            request.path.display(),
            request.folder_id
        );
        Ok(())
    }
}

fn check_regular_file(path: &Path) -> Result<(), UploadError> {
    let meta = std::fs::metadata(path).map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.is_file() {
        Ok(())
    } else {
        Err(UploadError::NotAFile(path.to_path_buf()))
    }
}

/// True when the `HX-Trigger` JSON carries `"upload": "success"`.
fn trigger_reports_success(trigger: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(trigger)
        .ok()
        .and_then(|v| v.get("upload").and_then(|u| u.as_str().map(|s| s == "success")))
        .unwrap_or(false)
}
