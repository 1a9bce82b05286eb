//! Document retrieval
//!
//! This module fetches WSDL and XSD documents from the file system or over
//! HTTP(S). Redirect following is bounded and oversized documents are
//! rejected before they reach the parser.

use crate::error::{Error, Result};
use crate::locations::Location;
use log::debug;
use std::fs;

/// Default cap on fetched document size, in bytes
const DEFAULT_MAX_DOCUMENT_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// Default bound on HTTP redirect hops
const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Document loader for WSDL and imported XSD sources
#[derive(Debug, Clone)]
pub struct Loader {
    /// Maximum fetched document size in bytes
    max_document_size: usize,
    /// Whether to allow remote documents
    allow_remote: bool,
    /// Maximum number of HTTP redirect hops
    max_redirects: usize,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            allow_remote: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Set the maximum fetched document size
    pub fn with_max_document_size(mut self, size: usize) -> Self {
        self.max_document_size = size;
        self
    }

    /// Set whether to allow remote documents
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Set the maximum number of HTTP redirect hops
    pub fn with_max_redirects(mut self, hops: usize) -> Self {
        self.max_redirects = hops;
        self
    }

    /// Fetch a document as text
    pub fn fetch(&self, location: &Location) -> Result<String> {
        debug!("fetching {}", location.as_str());

        let content = match location {
            Location::Path(path) => fs::read_to_string(path).map_err(|e| {
                Error::Retrieval(format!("failed to read '{}': {}", path.display(), e))
            })?,
            Location::Url(url) => {
                if !self.allow_remote {
                    return Err(Error::Retrieval(
                        "remote documents are not allowed".to_string(),
                    ));
                }

                let client = reqwest::blocking::Client::builder()
                    .redirect(reqwest::redirect::Policy::limited(self.max_redirects))
                    .build()
                    .map_err(|e| {
                        Error::Retrieval(format!("failed to build HTTP client: {}", e))
                    })?;

                client
                    .get(url.clone())
                    .send()
                    .and_then(|response| response.error_for_status())
                    .and_then(|response| response.text())
                    .map_err(|e| Error::Retrieval(format!("failed to fetch '{}': {}", url, e)))?
            }
        };

        if content.len() > self.max_document_size {
            return Err(Error::Retrieval(format!(
                "document '{}' is {} bytes, over the {} byte limit",
                location.as_str(),
                content.len(),
                self.max_document_size
            )));
        }

        Ok(content)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
