//! `filebox download <file_id>` – fetch a file and save it locally.

use anyhow::{Context, Result};
use filebox_core::actions;
use filebox_core::checksum;
use filebox_core::config::FileboxConfig;
use filebox_core::download::{DownloadRequest, FileDownloader};
use filebox_core::http::CurlTransport;
use filebox_core::notify::ConsoleNotifier;
use filebox_core::save::DirectoryHost;
use std::path::PathBuf;

pub async fn run_download(
    cfg: &FileboxConfig,
    server: &str,
    api_key: String,
    file_id: String,
    download_dir: PathBuf,
    print_checksum: bool,
) -> Result<bool> {
    let downloader = FileDownloader::new(CurlTransport::new(cfg.connect_timeout()), server)
        .with_context(|| format!("server URL {}", server))?;
    let request = DownloadRequest::new(file_id, api_key);

    let (filename, saved) = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut host = DirectoryHost::new(&download_dir)
            .with_context(|| format!("download dir {}", download_dir.display()))?;
        let filename = actions::download_file(&downloader, &request, &mut host, &ConsoleNotifier);
        Ok((filename, host.saved().to_vec()))
    })
    .await
    .context("download task join")??;

    for path in &saved {
        println!("Saved {}", path.display());
        if print_checksum {
            let digest = checksum::sha256_path(path)?;
            println!("{}  {}", digest, path.display());
        }
    }
    Ok(filename.is_some())
}
