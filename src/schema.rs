//! Schema imports and the merged complex-type registry
//!
//! Complex types come from two places: the WSDL's own inline schema, and the
//! schemas its `xsd:import` elements point at. Everything ends up in one
//! flat [`TypeRegistry`] keyed by type name, built by an explicit fold with
//! last-merged-wins precedence: local definitions go in first, then each
//! imported set in declaration order, each overwriting any colliding name.
//!
//! A broken import degrades the registry instead of failing the parse; see
//! [`resolve_imports`].

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::extract;
use crate::loaders::Loader;
use crate::locations::Location;
use crate::XSD_NAMESPACE;
use indexmap::IndexMap;
use log::debug;

/// Merged mapping from complex-type name to its structural definition
pub type TypeRegistry = IndexMap<String, ComplexTypeDef>;

/// An `xsd:import` discovered in the inline schema.
///
/// Transient: consumed during resolution, not part of the parsed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaImport {
    /// The import's `schemaLocation`, relative or absolute
    pub schema_location: String,
}

/// A field of a flattened complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Declared type as written in the schema
    pub type_name: String,
    /// `minOccurs` as written, if present
    pub min_occurs: Option<String>,
    /// `maxOccurs` as written, if present
    pub max_occurs: Option<String>,
    /// Whether the field is nillable
    pub nillable: bool,
}

/// A named complex type flattened to its field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDef {
    /// Type name
    pub name: String,
    /// Fields of the type's content model, in document order
    pub fields: Vec<FieldDef>,
}

/// Every inline-schema `import` carrying a `schemaLocation`, in declaration
/// order
pub fn schema_imports(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Vec<SchemaImport> {
    let Some(schema) = extract::inline_schema(doc, wsdl_prefix, xsd_prefix) else {
        return Vec::new();
    };

    schema
        .children_named(xsd_prefix, "import")
        .into_iter()
        .filter_map(|import| {
            import.attribute("schemaLocation").map(|location| SchemaImport {
                schema_location: location.to_string(),
            })
        })
        .collect()
}

/// The `namespace` attributes of the inline-schema imports.
///
/// Feeds the namespace classifier: a declared URI matching one of these is
/// an imported schema namespace.
pub fn imported_namespaces(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> Vec<String> {
    let Some(schema) = extract::inline_schema(doc, wsdl_prefix, xsd_prefix) else {
        return Vec::new();
    };

    schema
        .children_named(xsd_prefix, "import")
        .into_iter()
        .filter_map(|import| import.attribute("namespace").map(str::to_string))
        .collect()
}

/// Named complex-type definitions of the WSDL's inline schema
pub fn complex_type_definitions(
    doc: &Document,
    wsdl_prefix: &str,
    xsd_prefix: &str,
) -> TypeRegistry {
    match extract::inline_schema(doc, wsdl_prefix, xsd_prefix) {
        Some(schema) => definitions_in(schema, xsd_prefix),
        None => TypeRegistry::new(),
    }
}

/// Parse a standalone XSD document and extract its complex-type definitions
pub fn types_from_schema_source(source: &str) -> Result<TypeRegistry> {
    let doc = Document::from_string(source)?;
    let root = doc.root();

    if root.name != "schema" {
        return Err(Error::MalformedDocument(format!(
            "expected a schema document, found '{}'",
            root.name
        )));
    }

    let xsd_prefix = doc
        .declared_prefix_for(XSD_NAMESPACE)
        .unwrap_or(root.prefix.as_str())
        .to_string();

    Ok(definitions_in(doc.root(), &xsd_prefix))
}

/// Collect named complex types directly under a `schema` element.
///
/// Both declaration shapes are handled: `<complexType name="T">` and the
/// element-wrapped `<element name="T"><complexType>` form, where the type
/// takes the element's name.
fn definitions_in(schema: &Element, xsd_prefix: &str) -> TypeRegistry {
    let mut types = TypeRegistry::new();

    for child in &schema.children {
        if child.is_named(xsd_prefix, "complexType") {
            if let Some(name) = child.attribute("name") {
                types.insert(
                    name.to_string(),
                    ComplexTypeDef {
                        name: name.to_string(),
                        fields: fields_of(child, xsd_prefix),
                    },
                );
            }
        } else if child.is_named(xsd_prefix, "element") {
            let (Some(name), Some(complex)) = (
                child.attribute("name"),
                child.first_child(xsd_prefix, "complexType"),
            ) else {
                continue;
            };
            types.insert(
                name.to_string(),
                ComplexTypeDef {
                    name: name.to_string(),
                    fields: fields_of(complex, xsd_prefix),
                },
            );
        }
    }

    types
}

/// Flatten a complex type's content model into its field list
fn fields_of(complex_type: &Element, xsd_prefix: &str) -> Vec<FieldDef> {
    for container in ["sequence", "all", "choice"] {
        if let Some(group) = complex_type.first_child(xsd_prefix, container) {
            return group
                .children_named(xsd_prefix, "element")
                .into_iter()
                .filter_map(|field| {
                    field.attribute("name").map(|name| FieldDef {
                        name: name.to_string(),
                        type_name: field.attribute("type").unwrap_or_default().to_string(),
                        min_occurs: field.attribute("minOccurs").map(str::to_string),
                        max_occurs: field.attribute("maxOccurs").map(str::to_string),
                        nillable: field.attribute("nillable") == Some("true"),
                    })
                })
                .collect();
        }
    }
    Vec::new()
}

/// Resolve each import against the referencing document's location and
/// extract the complex types of every reachable schema.
///
/// A failed retrieval or parse contributes an empty type set instead of
/// aborting the parse; a broken secondary schema only shrinks the merged
/// registry. Results come back in declaration order. Imports of imported
/// schemas are not followed.
pub fn resolve_imports(
    imports: &[SchemaImport],
    base: &Location,
    loader: &Loader,
) -> Vec<TypeRegistry> {
    imports
        .iter()
        .map(|import| match load_import(import, base, loader) {
            Ok(types) => types,
            Err(err) => {
                debug!("skipping import '{}': {}", import.schema_location, err);
                TypeRegistry::new()
            }
        })
        .collect()
}

fn load_import(import: &SchemaImport, base: &Location, loader: &Loader) -> Result<TypeRegistry> {
    let location = base.join(&import.schema_location)?;
    let source = loader.fetch(&location)?;
    types_from_schema_source(&source)
}

/// Fold imported type sets over the local definitions.
///
/// Local types form the base and are merged first; each imported set then
/// overwrites colliding names in declaration order, so the last merged
/// definition always wins.
pub fn merge_type_registries(local: TypeRegistry, imported: Vec<TypeRegistry>) -> TypeRegistry {
    imported.into_iter().fold(local, |mut merged, types| {
        merged.extend(types);
        merged
    })
}
