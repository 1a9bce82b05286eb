//! End-to-end parse scenarios
//!
//! These tests exercise the full pipeline: prefix resolution, namespace
//! classification, the document extractions, on-disk import resolution, and
//! the merged type registry.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use wsdlschema::{
    parse_wsdl, Error, Location, NamespaceRole, ParserOptions, SoapVersion, WsdlParser,
};

const SERVICE: &str = r#"<wsdl:definitions
    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:tns="urn:svc"
    targetNamespace="urn:svc">
  <wsdl:types>
    <xsd:schema targetNamespace="urn:svc" elementFormDefault="qualified">
      <xsd:element name="GetStatus" type="tns:GetStatusType"/>
      <xsd:complexType name="GetStatusType">
        <xsd:sequence>
          <xsd:element name="id" type="xsd:string"/>
        </xsd:sequence>
      </xsd:complexType>
    </xsd:schema>
  </wsdl:types>
  <wsdl:binding name="SvcBinding" type="tns:SvcPortType">
    <wsdl:operation name="GetStatus">
      <soap:operation soapAction="urn:svc/GetStatus"/>
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:service name="Svc">
    <wsdl:port name="SvcPort" binding="tns:SvcBinding">
      <soap:address location="http://host/svc"/>
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#;

fn base() -> Location {
    Location::from_str("service.wsdl").unwrap()
}

#[test]
fn end_to_end_soap_1_1() {
    let parsed = parse_wsdl(SERVICE, &base()).unwrap();

    assert_eq!(parsed.soap_version, SoapVersion::V1_1);
    assert_eq!(parsed.endpoint, "http://host/svc");

    assert_eq!(parsed.operations.len(), 1);
    assert_eq!(parsed.operations[0].name, "GetStatus");
    assert_eq!(parsed.operations[0].soap_action, "urn:svc/GetStatus");

    assert_eq!(parsed.complex_types.len(), 1);
    assert_eq!(parsed.complex_types[0].name, "GetStatus");
    assert_eq!(parsed.complex_types[0].type_name, "tns:GetStatusType");

    assert_eq!(parsed.schema_attributes.target_namespace, "urn:svc");
    assert_eq!(parsed.schema_attributes.element_form_default, "qualified");

    assert_eq!(parsed.namespaces["tns"].role, NamespaceRole::Wsdl);
    assert_eq!(parsed.namespaces["soap"].role, NamespaceRole::Soap);

    assert_eq!(parsed.validation_types.len(), 1);
    assert_eq!(
        parsed.validation_types["GetStatusType"].fields[0].name,
        "id"
    );
}

#[test]
fn empty_soap_action_drops_the_operation() {
    let source = SERVICE.replace("soapAction=\"urn:svc/GetStatus\"", "soapAction=\"\"");
    let parsed = parse_wsdl(&source, &base()).unwrap();

    assert_eq!(parsed.operations, vec![]);
    // the rest of the model is unaffected
    assert_eq!(parsed.endpoint, "http://host/svc");
}

#[test]
fn repeated_parses_are_identical() {
    let first = parse_wsdl(SERVICE, &base()).unwrap();
    let second = parse_wsdl(SERVICE, &base()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn soap_1_2_binding_namespace() {
    let source = SERVICE.replace(
        "http://schemas.xmlsoap.org/wsdl/soap/",
        "http://schemas.xmlsoap.org/wsdl/soap12/",
    );

    let parser = WsdlParser::new().with_options(ParserOptions {
        soap_version: SoapVersion::V1_2,
    });
    let parsed = parser.parse(&source, &base()).unwrap();

    assert_eq!(parsed.soap_version, SoapVersion::V1_2);
    assert_eq!(parsed.endpoint, "http://host/svc");
    assert_eq!(parsed.operations.len(), 1);

    // the same document resolved against SOAP 1.1 is unsupported
    let err = parse_wsdl(&source, &base()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDocument(_)));
}

/// A WSDL importing two schemas, written into `dir` alongside its imports
fn write_import_fixture(dir: &Path) -> (String, Location) {
    let source = r#"<wsdl:definitions
        xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
        xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        targetNamespace="urn:svc">
      <wsdl:types>
        <xsd:schema targetNamespace="urn:svc">
          <xsd:import namespace="urn:a" schemaLocation="types/a.xsd"/>
          <xsd:import namespace="urn:b" schemaLocation="types/b.xsd"/>
          <xsd:complexType name="Shared">
            <xsd:sequence>
              <xsd:element name="local" type="xsd:string"/>
            </xsd:sequence>
          </xsd:complexType>
        </xsd:schema>
      </wsdl:types>
    </wsdl:definitions>"#;

    fs::create_dir_all(dir.join("types")).unwrap();
    fs::write(
        dir.join("types/a.xsd"),
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:a">
          <xs:complexType name="Shared">
            <xs:sequence><xs:element name="from_a" type="xs:string"/></xs:sequence>
          </xs:complexType>
          <xs:complexType name="OnlyA">
            <xs:sequence><xs:element name="a" type="xs:int"/></xs:sequence>
          </xs:complexType>
        </xs:schema>"#,
    )
    .unwrap();
    fs::write(
        dir.join("types/b.xsd"),
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:b">
          <xs:complexType name="Shared">
            <xs:sequence><xs:element name="from_b" type="xs:string"/></xs:sequence>
          </xs:complexType>
        </xs:schema>"#,
    )
    .unwrap();

    (
        source.to_string(),
        Location::Path(dir.join("service.wsdl")),
    )
}

#[test]
fn imports_resolve_relative_to_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let (source, base) = write_import_fixture(dir.path());

    let parsed = parse_wsdl(&source, &base).unwrap();

    // local + OnlyA + Shared (overwritten twice)
    assert_eq!(parsed.validation_types.len(), 2);
    assert!(parsed.validation_types.contains_key("OnlyA"));
    assert!(parsed.validation_types.contains_key("Shared"));
}

#[test]
fn last_merged_import_wins() {
    let dir = tempfile::tempdir().unwrap();
    let (source, base) = write_import_fixture(dir.path());

    let parsed = parse_wsdl(&source, &base).unwrap();

    // Shared is defined locally, in import a, and in import b; the final
    // definition is b's
    let shared = &parsed.validation_types["Shared"];
    assert_eq!(shared.fields.len(), 1);
    assert_eq!(shared.fields[0].name, "from_b");
}

#[test]
fn unreachable_import_degrades_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let (source, base) = write_import_fixture(dir.path());
    fs::remove_file(dir.path().join("types/b.xsd")).unwrap();

    let parsed = parse_wsdl(&source, &base).unwrap();

    // b's contribution is simply missing; Shared falls back to a's
    // definition and everything else survives
    assert_eq!(parsed.validation_types["Shared"].fields[0].name, "from_a");
    assert!(parsed.validation_types.contains_key("OnlyA"));
}

#[test]
fn imported_namespaces_classify_as_xsd() {
    let dir = tempfile::tempdir().unwrap();
    let (source, base) = write_import_fixture(dir.path());

    // declare prefixes for the imported namespaces on the document element
    let source = source.replace(
        "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\"",
        "xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" xmlns:a=\"urn:a\" xmlns:b=\"urn:b\"",
    );
    let parsed = parse_wsdl(&source, &base).unwrap();

    assert_eq!(parsed.namespaces["a"].role, NamespaceRole::Xsd);
    assert_eq!(parsed.namespaces["b"].role, NamespaceRole::Xsd);
}
