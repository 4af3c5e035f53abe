//! Authenticated file download.
//!
//! `GET {server}/download/{file_id}` with the API key in the `access_token`
//! header. The suggested filename comes from `Content-Disposition` and the body
//! is buffered into a [`Blob`] before it is handed to the save host.
//! No retry; a failed request is reported once.

mod disposition;

pub use disposition::extract_filename;

use crate::http::{base_url, HttpTransport, TransportError, ACCESS_TOKEN_HEADER};
use crate::save::{save_blob, Blob, SaveError, SaveHost};
use url::Url;

/// What to fetch and with which key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Opaque identifier placed in the URL path as one segment.
    pub file_id: String,
    pub api_key: String,
}

impl DownloadRequest {
    pub fn new(file_id: impl ToString, api_key: impl Into<String>) -> Self {
        Self {
            file_id: file_id.to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Payload and the filename extracted from `Content-Disposition`.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub blob: Blob,
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("invalid download URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("network: {0}")]
    Network(#[from] TransportError),
    /// Non-2xx response; displays the reason phrase like the web client did.
    #[error("Error: {status_text}")]
    HttpStatus { status: u32, status_text: String },
    #[error("missing or malformed Content-Disposition header: {0}")]
    HeaderParse(String),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Fetches files from one storage server through an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct FileDownloader<T> {
    transport: T,
    base_url: Url,
}

impl<T: HttpTransport> FileDownloader<T> {
    pub fn new(transport: T, server_url: &str) -> Result<Self, DownloadError> {
        Ok(Self {
            transport,
            base_url: base_url(server_url)?,
        })
    }

    /// `{server}/download/{file_id}`, with `file_id` percent-encoded as a single segment.
    pub fn download_url(&self, file_id: &str) -> Result<Url, DownloadError> {
        let mut url = self.base_url.join("download/")?;
        url.path_segments_mut()
            .map_err(|_| DownloadError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(file_id);
        Ok(url)
    }

    /// Performs the GET and extracts filename and payload. Does not save.
    pub fn fetch(&self, request: &DownloadRequest) -> Result<DownloadResult, DownloadError> {
        let url = self.download_url(&request.file_id)?;
        let headers = [(ACCESS_TOKEN_HEADER, request.api_key.as_str())];
        let response = self.transport.get(url.as_str(), &headers)?;

        if !response.is_success() {
            tracing::warn!("GET {} returned HTTP {}", url, response.status);
            return Err(DownloadError::HttpStatus {
                status: response.status,
                status_text: response.status_message(),
            });
        }

        let disposition = response
            .header("Content-Disposition")
            .ok_or_else(|| DownloadError::HeaderParse("header absent".to_string()))?;
        let filename = extract_filename(disposition)
            .ok_or_else(|| DownloadError::HeaderParse(format!("no filename in {:?}", disposition)))?
            .to_string();

        tracing::debug!(
            "fetched file_id={} filename={:?} bytes={}",
            request.file_id,
            filename,
            response.body.len()
        );
        Ok(DownloadResult {
            blob: Blob::from(response.body),
            filename,
        })
    }

    /// Fetches and saves through `host`. Returns the filename handed to the saver.
    pub fn download<H>(&self, request: &DownloadRequest, host: &mut H) -> Result<String, DownloadError>
    where
        H: SaveHost + ?Sized,
    {
        let DownloadResult { blob, filename } = self.fetch(request)?;
        save_blob(host, &blob, &filename)?;
        Ok(filename)
    }
}
