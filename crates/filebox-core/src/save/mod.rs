//! Handing a downloaded payload to the "save as" mechanism.
//!
//! The save is driven through a [`SaveHost`], which plays the part of the
//! document and its object-URL registry: a payload is registered under a
//! temporary URL, a hidden anchor pointing at it is attached, clicked and
//! detached, and the URL is released. [`DirectoryHost`] implements this on the
//! local filesystem.

mod directory;
mod sanitize;

pub use directory::DirectoryHost;
pub use sanitize::{numbered_variant, safe_filename, DEFAULT_FILENAME};

use std::fmt;
use std::sync::Arc;

/// Immutable binary payload. Cloning shares the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob(Arc<[u8]>);

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob(bytes.into())
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Blob(bytes.into())
    }
}

/// Temporary URL naming a registered payload (`blob:filebox/3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        ObjectUrl(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The hidden hyperlink: `href` is the object URL, `download` the suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: ObjectUrl,
    pub download: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save: {0}")]
    Io(#[from] std::io::Error),
    #[error("anchor for {0} is not attached")]
    Detached(ObjectUrl),
    #[error("object URL {0} is unknown or revoked")]
    UnknownUrl(ObjectUrl),
}

/// Platform side of a save: object URL registry plus a place to attach anchors.
pub trait SaveHost {
    fn create_object_url(&mut self, blob: &Blob) -> Result<ObjectUrl, SaveError>;
    fn append(&mut self, anchor: &Anchor) -> Result<(), SaveError>;
    /// Activates the anchor, i.e. performs the actual save.
    fn click(&mut self, anchor: &Anchor) -> Result<(), SaveError>;
    fn remove(&mut self, anchor: &Anchor) -> Result<(), SaveError>;
    fn revoke_object_url(&mut self, url: &ObjectUrl);
}

/// Saves `blob` under the suggested `filename` through `host`.
///
/// Issues exactly one `create_object_url` and, once the anchor has been
/// clicked and detached, exactly one `revoke_object_url`. If attaching,
/// clicking or detaching fails the error is returned and the URL is left for
/// the host to reclaim.
pub fn save_blob<H>(host: &mut H, blob: &Blob, filename: &str) -> Result<(), SaveError>
where
    H: SaveHost + ?Sized,
{
    let url = host.create_object_url(blob)?;
    let anchor = Anchor {
        href: url.clone(),
        download: filename.to_string(),
    };
    host.append(&anchor)?;
    host.click(&anchor)?;
    host.remove(&anchor)?;
    host.revoke_object_url(&url);
    tracing::debug!("saved {} bytes as {:?} via {}", blob.len(), filename, url);
    Ok(())
}
