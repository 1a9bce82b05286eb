//! Parse orchestration
//!
//! [`WsdlParser`] sequences prefix resolution, namespace classification, the
//! four document extractions, import resolution, and the registry merge into
//! one [`ParsedDocument`]. Either the complete model is returned or a
//! classified error; no partial output ever escapes.
//!
//! Every parse works on its own input and produces its own output; there is
//! no shared state between invocations, so parsers may be used from several
//! threads without coordination.

use crate::documents::Document;
use crate::error::Result;
use crate::extract::{self, ComplexTypeRef, Operation, SchemaAttributes};
use crate::loaders::Loader;
use crate::locations::Location;
use crate::namespaces::{self, NamespaceEntry};
use crate::protocol::{self, SoapVersion};
use crate::schema::{self, TypeRegistry};
use indexmap::IndexMap;

/// Caller-facing parse options
///
/// `soap_version` selects which SOAP binding namespace the document is
/// expected to declare. The default is SOAP 1.1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// SOAP binding version to resolve against
    pub soap_version: SoapVersion,
}

/// Normalized service metadata extracted from one WSDL document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Declared namespaces keyed by prefix, each with its derived role
    pub namespaces: IndexMap<String, NamespaceEntry>,
    /// Service endpoint address, empty when the document carries none
    pub endpoint: String,
    /// Top-level element declarations of the inline schema
    pub complex_types: Vec<ComplexTypeRef>,
    /// Dispatchable operations, each with a non-empty SOAP action
    pub operations: Vec<Operation>,
    /// Attributes of the inline schema
    pub schema_attributes: SchemaAttributes,
    /// Merged complex-type definitions, local plus imported
    pub validation_types: TypeRegistry,
    /// SOAP version the document was resolved against
    pub soap_version: SoapVersion,
}

/// WSDL parser
#[derive(Debug, Clone, Default)]
pub struct WsdlParser {
    options: ParserOptions,
    loader: Loader,
}

impl WsdlParser {
    /// Create a parser with default options and a default loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse options
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the loader used for imported schemas
    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    /// Parse WSDL text into the normalized model.
    ///
    /// `base` is the document's own location, used only to resolve relative
    /// `schemaLocation` imports. A broken individual import shrinks
    /// `validation_types` without failing the parse; structural and
    /// namespace-resolution failures are fatal.
    pub fn parse(&self, source: &str, base: &Location) -> Result<ParsedDocument> {
        let doc = Document::from_string(source)?;

        let wsdl_prefix = protocol::resolve_wsdl_prefix(&doc)?;
        let soap_prefix = protocol::resolve_soap_prefix(&doc, self.options.soap_version)?;
        let xsd_prefix = protocol::resolve_schema_prefix(&doc)?;

        let namespaces = namespaces::classify(&doc, &wsdl_prefix, &xsd_prefix)?;

        let endpoint = extract::endpoint(&doc, &wsdl_prefix, &soap_prefix);
        let complex_types = extract::complex_type_refs(&doc, &wsdl_prefix, &xsd_prefix);
        let operations = extract::operations(&doc, &wsdl_prefix, &soap_prefix);
        let schema_attributes = extract::schema_attributes(&doc, &wsdl_prefix, &xsd_prefix)?;

        let local_types = schema::complex_type_definitions(&doc, &wsdl_prefix, &xsd_prefix);
        let imports = schema::schema_imports(&doc, &wsdl_prefix, &xsd_prefix);
        let imported = schema::resolve_imports(&imports, base, &self.loader);
        let validation_types = schema::merge_type_registries(local_types, imported);

        Ok(ParsedDocument {
            namespaces,
            endpoint,
            complex_types,
            operations,
            schema_attributes,
            validation_types,
            soap_version: self.options.soap_version,
        })
    }

    /// Fetch a WSDL document through the loader and parse it.
    ///
    /// Retrieval failure of the top-level document is fatal and propagates
    /// unchanged, unlike the lenient handling of imported schemas.
    pub fn parse_location(&self, location: &Location) -> Result<ParsedDocument> {
        let source = self.loader.fetch(location)?;
        self.parse(&source, location)
    }
}

/// Parse WSDL text with default options (SOAP 1.1) and a default loader
pub fn parse_wsdl(source: &str, base: &Location) -> Result<ParsedDocument> {
    WsdlParser::new().parse(source, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const MINIMAL: &str = r#"<wsdl:definitions
        xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
        xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        targetNamespace="urn:svc">
      <wsdl:types>
        <xsd:schema targetNamespace="urn:svc"/>
      </wsdl:types>
    </wsdl:definitions>"#;

    fn base() -> Location {
        Location::from_str("service.wsdl").unwrap()
    }

    #[test]
    fn test_minimal_document_parses() {
        let parsed = parse_wsdl(MINIMAL, &base()).unwrap();

        assert_eq!(parsed.soap_version, SoapVersion::V1_1);
        assert_eq!(parsed.endpoint, "");
        assert!(parsed.operations.is_empty());
        assert!(parsed.complex_types.is_empty());
        assert!(parsed.validation_types.is_empty());
        assert_eq!(parsed.schema_attributes.target_namespace, "urn:svc");
    }

    #[test]
    fn test_missing_soap_namespace_fails_before_extraction() {
        let xml = r#"<wsdl:definitions
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"/>"#;

        let err = parse_wsdl(xml, &base()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDocument(_)));
    }

    #[test]
    fn test_missing_inline_schema_is_fatal() {
        let xml = r#"<wsdl:definitions
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"/>"#;

        let err = parse_wsdl(xml, &base()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_top_level_retrieval_failure_propagates() {
        let parser = WsdlParser::new();
        let location = Location::from_str("/no/such/service.wsdl").unwrap();

        let err = parser.parse_location(&location).unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
    }
}
