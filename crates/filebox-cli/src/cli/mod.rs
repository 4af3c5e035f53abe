//! CLI for the filebox storage client.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use filebox_core::config::{self, FileboxConfig};
use std::path::PathBuf;

use commands::{run_completions, run_copy, run_download, run_upload};

/// Top-level CLI for the filebox client.
#[derive(Debug, Parser)]
#[command(name = "filebox")]
#[command(about = "filebox: download, upload and share files on a filebox server", long_about = None)]
pub struct Cli {
    /// Server base URL (overrides `server_url` in config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// API key sent as the `access_token` header (overrides `api_key` in config.toml).
    #[arg(long, global = true, value_name = "KEY")]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a file by ID and save it under the server-suggested name.
    Download {
        /// File identifier.
        file_id: String,
        /// Directory to save into (default: config `download_dir`, else the current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Print the SHA-256 of the saved file.
        #[arg(long)]
        checksum: bool,
    },

    /// Copy text, or the link from a share event, to the clipboard.
    Copy {
        #[command(flatten)]
        source: CopySource,
        /// Linux: keep serving the clipboard until another application takes it over.
        /// Without it the text is lost when filebox exits, unless a clipboard
        /// manager is running.
        #[arg(long)]
        wait: bool,
    },

    /// Upload a file into a folder.
    Upload {
        /// Path of the file to upload.
        path: PathBuf,
        /// Target folder ID.
        #[arg(long, value_name = "ID")]
        folder: i64,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

/// Exactly one source of text for `copy`.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct CopySource {
    /// Literal text to copy.
    pub text: Option<String>,
    /// JSON event file (`-` for stdin) whose `detail.xhr.response` carries `{"link": ...}`.
    #[arg(long, value_name = "PATH")]
    pub event: Option<String>,
    /// Any JSON value: a string is copied, an event object is unwrapped, anything else is rejected.
    #[arg(long, value_name = "VALUE")]
    pub json: Option<String>,
}

impl Cli {
    /// Parses arguments and runs the command. `Ok(false)` means the action
    /// failed after reporting to the user.
    pub async fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(true);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let server = cli.server.clone().unwrap_or_else(|| cfg.server_url.clone());

        match cli.command {
            CliCommand::Download {
                file_id,
                download_dir,
                checksum,
            } => {
                let key = resolve_key(cli.key, &cfg)?;
                let dir = match download_dir.or_else(|| cfg.download_dir.clone()) {
                    Some(d) => d,
                    None => std::env::current_dir()?,
                };
                run_download(&cfg, &server, key, file_id, dir, checksum).await
            }
            CliCommand::Copy { source, wait } => run_copy(source, wait).await,
            CliCommand::Upload { path, folder } => {
                let key = resolve_key(cli.key, &cfg)?;
                run_upload(&cfg, &server, key, path, folder).await
            }
            CliCommand::Completions { .. } => Ok(true),
        }
    }
}

/// `--key` wins over the config file; a key is required for server requests.
pub(crate) fn resolve_key(flag: Option<String>, cfg: &FileboxConfig) -> Result<String> {
    flag.or_else(|| cfg.api_key.clone())
        .filter(|k| !k.trim().is_empty())
        .with_context(|| {
            let path = config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string());
            format!("no API key: pass --key or set api_key in {}", path)
        })
}

#[cfg(test)]
mod tests;
