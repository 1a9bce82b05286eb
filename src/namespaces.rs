//! Namespace role classification
//!
//! Every namespace declared on a WSDL document plays one of three functional
//! roles when building requests against it: the service's own WSDL-level
//! identity, an XML Schema namespace pulled in through an inline-schema
//! import, or a SOAP protocol namespace. Roles are derived from the
//! document, never declared, and the derivation is total: every declared
//! prefix gets exactly one role.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::schema;
use indexmap::IndexMap;

/// Functional role of a declared namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceRole {
    /// The WSDL document's own target namespace
    Wsdl,
    /// An imported XML Schema namespace
    Xsd,
    /// SOAP protocol namespace (the catch-all default)
    Soap,
}

impl NamespaceRole {
    /// Role as its conventional string form
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespaceRole::Wsdl => "wsdl",
            NamespaceRole::Xsd => "xsd",
            NamespaceRole::Soap => "soap",
        }
    }
}

/// A declared namespace with its derived role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceEntry {
    /// Declared prefix, empty for the default namespace
    pub prefix: String,
    /// Namespace URI
    pub uri: String,
    /// Derived functional role
    pub role: NamespaceRole,
}

/// Classify every namespace declared at the document element.
///
/// The rules form an ordered cascade; the first matching rule wins and
/// [`NamespaceRole::Soap`] is the guaranteed default branch:
///
/// 1. a `definitions` element's `targetNamespace` equals the URI → `Wsdl`
/// 2. an inline-schema `import`'s `namespace` equals the URI → `Xsd`
/// 3. otherwise → `Soap`
///
/// The ordering is a deliberate tie-break: a URI satisfying both of the
/// first two rules is the document's own identity, not an import.
///
/// Fails with [`Error::MalformedDocument`] when the document has no
/// `definitions` element at all.
pub fn classify(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Result<IndexMap<String, NamespaceEntry>> {
    let definition_targets = definition_target_namespaces(doc, wsdl_prefix)?;
    let imported = schema::imported_namespaces(doc, wsdl_prefix, xsd_prefix);

    let rules: [(&dyn Fn(&str) -> bool, NamespaceRole); 2] = [
        (
            &|uri| definition_targets.iter().any(|target| target.as_str() == uri),
            NamespaceRole::Wsdl,
        ),
        (
            &|uri| imported.iter().any(|namespace| namespace.as_str() == uri),
            NamespaceRole::Xsd,
        ),
    ];

    let mut entries = IndexMap::new();
    for (prefix, uri) in doc.root_namespace_declarations() {
        let role = rules
            .iter()
            .find(|(matches, _)| matches(uri))
            .map(|(_, role)| *role)
            .unwrap_or(NamespaceRole::Soap);

        entries.insert(
            prefix.clone(),
            NamespaceEntry {
                prefix: prefix.clone(),
                uri: uri.clone(),
                role,
            },
        );
    }

    Ok(entries)
}

/// `targetNamespace` values of every `definitions` element in the document
fn definition_target_namespaces(doc: &Document, wsdl_prefix: &str) -> Result<Vec<String>> {
    let mut found = false;
    let mut targets = Vec::new();

    for element in std::iter::once(doc.root()).chain(doc.root().descendants()) {
        if element.is_named(wsdl_prefix, "definitions") {
            found = true;
            if let Some(target) = element.attribute("targetNamespace") {
                targets.push(target.to_string());
            }
        }
    }

    if !found {
        return Err(Error::MalformedDocument(
            "no definitions element".to_string(),
        ));
    }

    Ok(targets)
}
