//! # wsdlschema
//!
//! Extraction of normalized SOAP service metadata from WSDL documents and
//! their XSD imports.
//!
//! The crate turns raw WSDL text (plus the document's own location, used only
//! to resolve relative imports) into a single query-ready [`ParsedDocument`]:
//! which WSDL and SOAP binding namespaces are in play, every declared prefix
//! classified by its functional role, the service endpoint, the dispatchable
//! operations, and one merged complex-type registry assembled across
//! `xsd:import` boundaries.
//!
//! WSDL documents may bind any prefix to the protocol namespaces, so all
//! resolution is keyed by declared namespace URI; the resolved prefixes then
//! drive every document query.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wsdlschema::{parse_wsdl, Location};
//!
//! let source = std::fs::read_to_string("service.wsdl")?;
//! let base = Location::from_str("service.wsdl")?;
//! let parsed = parse_wsdl(&source, &base)?;
//!
//! for operation in &parsed.operations {
//!     println!("{} -> {}", operation.name, operation.soap_action);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules: errors and the XML collaborator
pub mod documents;
pub mod error;

// Namespace and protocol resolution
pub mod namespaces;
pub mod protocol;

// Resource loading
pub mod loaders;
pub mod locations;

// Document extraction and schema resolution
pub mod extract;
pub mod schema;

// Orchestration
pub mod parser;

// Re-exports for convenience
pub use error::{Error, Result};
pub use extract::{ComplexTypeRef, Operation, SchemaAttributes};
pub use loaders::Loader;
pub use locations::Location;
pub use namespaces::{NamespaceEntry, NamespaceRole};
pub use parser::{parse_wsdl, ParsedDocument, ParserOptions, WsdlParser};
pub use protocol::SoapVersion;
pub use schema::{ComplexTypeDef, FieldDef, SchemaImport, TypeRegistry};

/// Version of the wsdlschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WSDL 1.1 namespace
pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

/// SOAP 1.1 binding namespace
pub const SOAP_1_1_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";

/// SOAP 1.2 binding namespace
pub const SOAP_1_2_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
