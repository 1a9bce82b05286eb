//! Error types for wsdlschema
//!
//! This module defines all error types used throughout the library.
//! Structural and namespace-resolution failures are fatal and abort the
//! parse; an individual broken schema import is recovered locally by the
//! import resolver and never surfaces here.

use thiserror::Error;

/// Result type alias using wsdlschema Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wsdlschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required structural element is absent (no `definitions`, no inline
    /// `schema`)
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// No namespace declaration matches the expected WSDL, SOAP-version, or
    /// XML Schema URI
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    /// Document retrieval error (file read or HTTP fetch)
    #[error("retrieval error: {0}")]
    Retrieval(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
