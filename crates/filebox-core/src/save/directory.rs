//! Filesystem save host.
//!
//! Object URLs are backed by staged temp files inside the download directory.
//! Clicking an anchor copies the staged payload to its final, non-clobbering
//! name; revoking the URL deletes the staged file.

use super::sanitize::{numbered_variant, safe_filename};
use super::{Anchor, Blob, ObjectUrl, SaveError, SaveHost};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Give up after this many `name (n).ext` candidates.
const MAX_NUMBERED: u32 = 9999;

#[derive(Debug)]
pub struct DirectoryHost {
    dir: PathBuf,
    staged: HashMap<ObjectUrl, NamedTempFile>,
    attached: Vec<Anchor>,
    next_id: u64,
    saved: Vec<PathBuf>,
}

impl DirectoryHost {
    /// Host saving into `dir`, which is created if missing.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            staged: HashMap::new(),
            attached: Vec::new(),
            next_id: 0,
            saved: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final paths written by clicks, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Number of object URLs that are still registered.
    pub fn live_urls(&self) -> usize {
        self.staged.len()
    }

    /// Creates the first free `name`, `name (1)`, `name (2)`, ... in the directory.
    fn create_destination(&self, name: &str) -> io::Result<(PathBuf, File)> {
        for n in 0..=MAX_NUMBERED {
            let candidate = if n == 0 {
                name.to_string()
            } else {
                numbered_variant(name, n)
            };
            let path = self.dir.join(&candidate);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {} in {}", name, self.dir.display()),
        ))
    }
}

impl SaveHost for DirectoryHost {
    fn create_object_url(&mut self, blob: &Blob) -> Result<ObjectUrl, SaveError> {
        let mut staged = tempfile::Builder::new()
            .prefix(".filebox-")
            .suffix(".blob")
            .tempfile_in(&self.dir)?;
        staged.write_all(blob.as_bytes())?;
        staged.flush()?;

        self.next_id += 1;
        let url = ObjectUrl::new(format!("blob:filebox/{}", self.next_id));
        self.staged.insert(url.clone(), staged);
        Ok(url)
    }

    fn append(&mut self, anchor: &Anchor) -> Result<(), SaveError> {
        self.attached.push(anchor.clone());
        Ok(())
    }

    fn click(&mut self, anchor: &Anchor) -> Result<(), SaveError> {
        if !self.attached.contains(anchor) {
            return Err(SaveError::Detached(anchor.href.clone()));
        }
        let staged = self
            .staged
            .get(&anchor.href)
            .ok_or_else(|| SaveError::UnknownUrl(anchor.href.clone()))?;

        let name = safe_filename(&anchor.download);
        let (path, mut dest) = self.create_destination(&name)?;
        let mut src = staged.reopen()?;
        if let Err(e) = io::copy(&mut src, &mut dest).and_then(|_| dest.sync_all()) {
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }

        tracing::info!("saved {} to {}", anchor.href, path.display());
        self.saved.push(path);
        Ok(())
    }

    fn remove(&mut self, anchor: &Anchor) -> Result<(), SaveError> {
        match self.attached.iter().position(|a| a == anchor) {
            Some(i) => {
                self.attached.remove(i);
                Ok(())
            }
            None => Err(SaveError::Detached(anchor.href.clone())),
        }
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) {
        match self.staged.remove(url) {
            Some(staged) => {
                if let Err(e) = staged.close() {
                    tracing::warn!("failed to delete staged file for {}: {}", url, e);
                }
            }
            None => tracing::debug!("revoke of unknown object URL {}", url),
        }
    }
}
