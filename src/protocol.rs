//! WSDL and SOAP protocol version resolution
//!
//! Real-world documents bind arbitrary prefixes to the WSDL and SOAP binding
//! namespaces, so everything here resolves by declared namespace URI. The
//! resolved prefixes become the selector parameters for every later document
//! query; prefix literals are never hard-coded.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::{SOAP_1_1_NAMESPACE, SOAP_1_2_NAMESPACE, WSDL_NAMESPACE, XSD_NAMESPACE};
use std::fmt;
use std::str::FromStr;

/// SOAP binding version selectable by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoapVersion {
    /// SOAP 1.1
    #[default]
    V1_1,
    /// SOAP 1.2
    V1_2,
}

impl SoapVersion {
    /// Namespace URI of the binding vocabulary for this version
    pub fn namespace_uri(&self) -> &'static str {
        match self {
            SoapVersion::V1_1 => SOAP_1_1_NAMESPACE,
            SoapVersion::V1_2 => SOAP_1_2_NAMESPACE,
        }
    }

    /// Version as its conventional string form
    pub fn as_str(&self) -> &'static str {
        match self {
            SoapVersion::V1_1 => "1.1",
            SoapVersion::V1_2 => "1.2",
        }
    }
}

impl fmt::Display for SoapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoapVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1.1" => Ok(SoapVersion::V1_1),
            "1.2" => Ok(SoapVersion::V1_2),
            other => Err(Error::Other(format!("unknown SOAP version '{}'", other))),
        }
    }
}

/// Resolve the prefix bound to the WSDL namespace.
///
/// The prefix drives every WSDL-level query (`definitions`, `service`,
/// `port`, `binding`, `operation`).
pub fn resolve_wsdl_prefix(doc: &Document) -> Result<String> {
    doc.declared_prefix_for(WSDL_NAMESPACE)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::UnsupportedDocument(format!(
                "no namespace declaration for WSDL '{}'",
                WSDL_NAMESPACE
            ))
        })
}

/// Resolve the prefix bound to the SOAP binding namespace of the selected
/// version.
pub fn resolve_soap_prefix(doc: &Document, version: SoapVersion) -> Result<String> {
    doc.declared_prefix_for(version.namespace_uri())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::UnsupportedDocument(format!(
                "no namespace declaration for SOAP {} '{}'",
                version,
                version.namespace_uri()
            ))
        })
}

/// Resolve the prefix bound to the XML Schema namespace.
pub fn resolve_schema_prefix(doc: &Document) -> Result<String> {
    doc.declared_prefix_for(XSD_NAMESPACE)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::UnsupportedDocument(format!(
                "no namespace declaration for XML Schema '{}'",
                XSD_NAMESPACE
            ))
        })
}
