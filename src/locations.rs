//! Resource location resolution
//!
//! This module handles resolution of document locations (URLs or file
//! paths) for loading WSDL and imported XSD documents. The key operation is
//! [`Location::join`]: a `schemaLocation` reference is always resolved
//! against the directory of the referencing document, never against the
//! process working directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Document location - a file system path or a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (http, https, etc.)
    Url(Url),
}

impl Location {
    /// Create a location from a string (auto-detect type)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match Url::parse(s) {
            Ok(url) if url.scheme() == "file" => {
                let path = url.to_file_path().map_err(|()| {
                    Error::Retrieval(format!("file URL '{}' has no usable path", s))
                })?;
                Ok(Location::Path(path))
            }
            Ok(url) => Ok(Location::Url(url)),
            Err(_) => Ok(Location::Path(PathBuf::from(s))),
        }
    }

    /// Resolve a reference (typically a `schemaLocation`) against this
    /// document's location.
    ///
    /// An absolute URL reference wins outright; anything else resolves
    /// relative to the directory containing this document.
    pub fn join(&self, reference: &str) -> Result<Location> {
        if Url::parse(reference).is_ok() {
            return Self::from_str(reference);
        }

        match self {
            Location::Url(base) => Ok(Location::Url(base.join(reference)?)),
            Location::Path(base) => {
                let dir = base.parent().unwrap_or_else(|| Path::new(""));
                Ok(Location::Path(dir.join(reference)))
            }
        }
    }

    /// Get the location as a string
    pub fn as_str(&self) -> String {
        match self {
            Location::Path(p) => p.to_string_lossy().to_string(),
            Location::Url(u) => u.to_string(),
        }
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        matches!(self, Location::Path(_))
    }
}
