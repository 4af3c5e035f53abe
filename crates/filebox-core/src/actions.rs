//! User-level actions: run an operation, log any failure and decide what the
//! user is told. None of these propagate errors.
//!
//! - download: any failure logs and shows one generic error message.
//! - copy: success shows a confirmation; every failure is logged only, with
//!   no message to the user.
//! - upload: success and failure each show a message.

use crate::clipboard::{ClipboardCopier, ClipboardWriter, CopyError, CopyInput};
use crate::download::{DownloadRequest, FileDownloader};
use crate::http::HttpTransport;
use crate::notify::Notifier;
use crate::save::SaveHost;
use crate::upload::{UploadRequest, Uploader};
use serde_json::Value;

pub const DOWNLOAD_FAILED: &str = "Failed to download file.";
pub const LINK_COPIED: &str = "Link copied to clipboard!";
pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully!";
pub const UPLOAD_FAILED: &str = "Failed to upload file.";

/// Downloads and saves one file. Returns the suggested filename on success.
pub fn download_file<T, H, N>(
    downloader: &FileDownloader<T>,
    request: &DownloadRequest,
    host: &mut H,
    notifier: &N,
) -> Option<String>
where
    T: HttpTransport,
    H: SaveHost + ?Sized,
    N: Notifier + ?Sized,
{
    match downloader.download(request, host) {
        Ok(filename) => Some(filename),
        Err(e) => {
            tracing::error!(file_id = %request.file_id, "Error: {}", e);
            notifier.error(DOWNLOAD_FAILED);
            None
        }
    }
}

/// Copies `input`; shows a confirmation only when the clipboard write succeeds.
pub fn copy_to_clipboard<C, N>(
    copier: &mut ClipboardCopier<C>,
    input: &CopyInput,
    notifier: &N,
) -> bool
where
    C: ClipboardWriter,
    N: Notifier + ?Sized,
{
    report_copy(copier.copy(input), notifier)
}

/// Like [`copy_to_clipboard`] for an untyped value (a string or an event object).
pub fn copy_value_to_clipboard<C, N>(
    copier: &mut ClipboardCopier<C>,
    value: Value,
    notifier: &N,
) -> bool
where
    C: ClipboardWriter,
    N: Notifier + ?Sized,
{
    report_copy(copier.copy_value(value), notifier)
}

fn report_copy<N: Notifier + ?Sized>(result: Result<String, CopyError>, notifier: &N) -> bool {
    match result {
        Ok(_) => {
            notifier.success(LINK_COPIED);
            true
        }
        Err(e @ CopyError::InvalidInput(_)) => {
            tracing::error!("Invalid input to copy: {}", e);
            false
        }
        Err(e) => {
            tracing::error!("Error copying to clipboard: {}", e);
            false
        }
    }
}

/// Uploads one file into a folder.
pub fn upload_file<T, N>(uploader: &Uploader<T>, request: &UploadRequest, notifier: &N) -> bool
where
    T: HttpTransport,
    N: Notifier + ?Sized,
{
    match uploader.upload(request) {
        Ok(()) => {
            notifier.success(UPLOAD_SUCCEEDED);
            true
        }
        Err(e) => {
            tracing::error!(path = %request.path.display(), "Error uploading: {}", e);
            notifier.error(UPLOAD_FAILED);
            false
        }
    }
}
