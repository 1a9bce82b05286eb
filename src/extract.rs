//! Read-only metadata queries against a WSDL document
//!
//! Four independent extractions, each parameterized by the prefixes resolved
//! in [`crate::protocol`]: the endpoint address, the inline schema's
//! top-level element declarations, the dispatchable operations, and the
//! schema attributes. None depends on another's result.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};

/// A named top-level element of the inline schema and its declared XML type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeRef {
    /// Element name
    pub name: String,
    /// Declared type as written in the document (empty when the element
    /// carries an anonymous inline type instead)
    pub type_name: String,
}

/// A binding operation with its SOAP action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Operation name
    pub name: String,
    /// SOAP action URI, always non-empty
    pub soap_action: String,
}

/// Attributes of the inline schema element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAttributes {
    /// `targetNamespace` of the inline schema, empty when absent
    pub target_namespace: String,
    /// `elementFormDefault` of the inline schema, empty when absent
    pub element_form_default: String,
}

/// The single inline `schema` element under `definitions/types`, if present
pub(crate) fn inline_schema<'a>(
    doc: &'a Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Option<&'a Element> {
    doc.root()
        .children_named(wsdl_prefix, "types")
        .into_iter()
        .find_map(|types| types.first_child(xsd_prefix, "schema"))
}

/// The service endpoint address from
/// `definitions/service/port/soap:address/@location`.
///
/// Returns an empty string when absent; not every document is bound to a
/// live endpoint at parse time.
pub fn endpoint(doc: &Document, wsdl_prefix: &str, soap_prefix: &str) -> String {
    for service in doc.root().children_named(wsdl_prefix, "service") {
        for port in service.children_named(wsdl_prefix, "port") {
            for address in port.children_named(soap_prefix, "address") {
                if let Some(location) = address.attribute("location") {
                    return location.to_string();
                }
            }
        }
    }
    String::new()
}

/// Every `element` directly under the inline schema, as `{name, type}`
/// pairs in document order.
pub fn complex_type_refs(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Vec<ComplexTypeRef> {
    let Some(schema) = inline_schema(doc, wsdl_prefix, xsd_prefix) else {
        return Vec::new();
    };

    schema
        .children_named(xsd_prefix, "element")
        .into_iter()
        .filter_map(|element| {
            element.attribute("name").map(|name| ComplexTypeRef {
                name: name.to_string(),
                type_name: element.attribute("type").unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Every `binding/operation` paired with its nested SOAP action, in document
/// order.
///
/// Operations whose SOAP action is empty or missing cannot be dispatched and
/// are dropped.
pub fn operations(doc: &Document, wsdl_prefix: &str, soap_prefix: &str) -> Vec<Operation> {
    let mut out = Vec::new();

    for binding in doc.root().children_named(wsdl_prefix, "binding") {
        for operation in binding.children_named(wsdl_prefix, "operation") {
            let Some(name) = operation.attribute("name") else {
                continue;
            };

            let soap_action = operation
                .children_named(soap_prefix, "operation")
                .into_iter()
                .find_map(|soap_op| soap_op.attribute("soapAction"))
                .unwrap_or_default();

            if soap_action.is_empty() {
                continue;
            }

            out.push(Operation {
                name: name.to_string(),
                soap_action: soap_action.to_string(),
            });
        }
    }

    out
}

/// The `{target_namespace, element_form_default}` pair of the inline schema.
///
/// A document without an inline schema cannot describe its message types and
/// fails as malformed.
pub fn schema_attributes(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Result<SchemaAttributes> {
    let schema = inline_schema(doc, wsdl_prefix, xsd_prefix).ok_or_else(|| {
        Error::MalformedDocument("no inline schema under definitions/types".to_string())
    })?;

    Ok(SchemaAttributes {
        target_namespace: schema
            .attribute("targetNamespace")
            .unwrap_or_default()
            .to_string(),
        element_form_default: schema
            .attribute("elementFormDefault")
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<wsdl:definitions
        xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
        xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:tns="urn:svc"
        targetNamespace="urn:svc">
      <wsdl:types>
        <xsd:schema targetNamespace="urn:svc" elementFormDefault="qualified">
          <xsd:element name="GetStatus" type="tns:GetStatusType"/>
          <xsd:element name="GetStatusResponse" type="tns:GetStatusResponseType"/>
          <xsd:element name="Inline"/>
        </xsd:schema>
      </wsdl:types>
      <wsdl:binding name="SvcBinding" type="tns:SvcPortType">
        <wsdl:operation name="GetStatus">
          <soap:operation soapAction="urn:svc/GetStatus"/>
        </wsdl:operation>
        <wsdl:operation name="Ping">
          <soap:operation soapAction=""/>
        </wsdl:operation>
        <wsdl:operation name="GetDetails">
          <soap:operation soapAction="urn:svc/GetDetails"/>
        </wsdl:operation>
      </wsdl:binding>
      <wsdl:service name="Svc">
        <wsdl:port name="SvcPort" binding="tns:SvcBinding">
          <soap:address location="http://host/svc"/>
        </wsdl:port>
      </wsdl:service>
    </wsdl:definitions>"#;

    fn doc() -> Document {
        Document::from_string(DOC).unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint(&doc(), "wsdl", "soap"), "http://host/svc");
    }

    #[test]
    fn test_endpoint_absent_is_empty() {
        let xml = r#"<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"/>"#;
        let doc = Document::from_string(xml).unwrap();
        assert_eq!(endpoint(&doc, "wsdl", "soap"), "");
    }

    #[test]
    fn test_complex_type_refs_in_document_order() {
        let refs = complex_type_refs(&doc(), "wsdl", "xsd");
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].name, "GetStatus");
        assert_eq!(refs[0].type_name, "tns:GetStatusType");
        assert_eq!(refs[1].name, "GetStatusResponse");
        // anonymous inline type captures as empty
        assert_eq!(refs[2].name, "Inline");
        assert_eq!(refs[2].type_name, "");
    }

    #[test]
    fn test_operations_filter_empty_soap_action() {
        let ops = operations(&doc(), "wsdl", "soap");
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].name, "GetStatus");
        assert_eq!(ops[0].soap_action, "urn:svc/GetStatus");
        assert_eq!(ops[1].name, "GetDetails");
        assert_eq!(ops[1].soap_action, "urn:svc/GetDetails");
    }

    #[test]
    fn test_operation_without_soap_operation_is_dropped() {
        let xml = r#"<w:definitions xmlns:w="http://schemas.xmlsoap.org/wsdl/">
          <w:binding name="B">
            <w:operation name="NoAction"/>
          </w:binding>
        </w:definitions>"#;
        let doc = Document::from_string(xml).unwrap();
        assert!(operations(&doc, "w", "soap").is_empty());
    }

    #[test]
    fn test_schema_attributes() {
        let attrs = schema_attributes(&doc(), "wsdl", "xsd").unwrap();
        assert_eq!(attrs.target_namespace, "urn:svc");
        assert_eq!(attrs.element_form_default, "qualified");
    }

    #[test]
    fn test_missing_inline_schema_is_malformed() {
        let xml = r#"<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/">
          <wsdl:types/>
        </wsdl:definitions>"#;
        let doc = Document::from_string(xml).unwrap();

        let err = schema_attributes(&doc, "wsdl", "xsd").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }
}
