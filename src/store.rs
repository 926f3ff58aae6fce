//! Schema store - named-definition lookup and reference resolution.
//!
//! Holds every named schema from the document, parsed once into tagged
//! [`SchemaNode`]s, plus the raw JSON needed for payload checking.

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::ScaffoldError;
use crate::schema::SchemaNode;

/// Where the document keeps its named schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSection {
    /// Swagger 2.0: `#/definitions/...`
    Definitions,
    /// OpenAPI 3.x: `#/components/schemas/...`
    Components,
}

impl SchemaSection {
    /// Reference prefix for this section.
    pub fn prefix(&self) -> &'static str {
        match self {
            SchemaSection::Definitions => "#/definitions/",
            SchemaSection::Components => "#/components/schemas/",
        }
    }
}

/// Parsed named schemas from one document, in declaration order.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    section: SchemaSection,
    nodes: IndexMap<String, SchemaNode>,
    raw: IndexMap<String, Value>,
}

impl SchemaStore {
    /// Build a store from a parsed OpenAPI/Swagger document.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::InvalidDocument` when the document has neither
    /// a schema section nor a path map - there is nothing to generate from.
    pub fn from_document(document: &Value) -> Result<SchemaStore, ScaffoldError> {
        let (section, raw_schemas) = match schema_section(document) {
            Some(found) => found,
            None if document.get("paths").is_some() => {
                // Operations without named schemas: discovery still works.
                return Ok(SchemaStore {
                    section: SchemaSection::Components,
                    nodes: IndexMap::new(),
                    raw: IndexMap::new(),
                });
            }
            None => {
                return Err(ScaffoldError::InvalidDocument {
                    message: "document has neither a schema section \
                              (definitions / components.schemas) nor paths"
                        .into(),
                })
            }
        };

        let mut nodes = IndexMap::new();
        let mut raw = IndexMap::new();
        for (name, schema) in raw_schemas {
            nodes.insert(name.clone(), SchemaNode::parse(schema));
            raw.insert(name.clone(), schema.clone());
        }

        Ok(SchemaStore {
            section,
            nodes,
            raw,
        })
    }

    /// Named definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Names of all definitions, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Look up one definition by name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(name)
    }

    /// Resolve a `$ref` string to the definition it targets.
    ///
    /// Accepts both reference prefixes and a bare definition name.
    /// Returns `None` for references outside the document.
    pub fn resolve_reference(&self, reference: &str) -> Option<(&str, &SchemaNode)> {
        let name = reference_name(reference)?;
        self.nodes
            .get_key_value(name)
            .map(|(key, node)| (key.as_str(), node))
    }

    /// A standalone JSON Schema for one named definition, with every sibling
    /// definition reachable so internal `$ref`s resolve. Used for payload
    /// checking.
    pub fn standalone_schema(&self, name: &str) -> Result<Value, ScaffoldError> {
        if !self.raw.contains_key(name) {
            return Err(ScaffoldError::UnknownSchema { name: name.into() });
        }

        let definitions: Value = self
            .raw
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<serde_json::Map<String, Value>>()
            .into();

        let reference = format!("{}{}", self.section.prefix(), name);
        Ok(match self.section {
            SchemaSection::Definitions => {
                json!({ "$ref": reference, "definitions": definitions })
            }
            SchemaSection::Components => {
                json!({ "$ref": reference, "components": { "schemas": definitions } })
            }
        })
    }

    /// Which section this document keeps schemas under.
    pub fn section(&self) -> SchemaSection {
        self.section
    }
}

/// Extract the definition name from a reference string.
pub fn reference_name(reference: &str) -> Option<&str> {
    for prefix in ["#/definitions/", "#/components/schemas/"] {
        if let Some(name) = reference.strip_prefix(prefix) {
            // Nested pointers into a definition are not named types.
            return (!name.is_empty() && !name.contains('/')).then_some(name);
        }
    }
    // Bare name (already stripped by an upstream tool).
    (!reference.is_empty() && !reference.contains('/') && !reference.starts_with('#'))
        .then_some(reference)
}

fn schema_section(document: &Value) -> Option<(SchemaSection, &serde_json::Map<String, Value>)> {
    if let Some(defs) = document.get("definitions").and_then(Value::as_object) {
        return Some((SchemaSection::Definitions, defs));
    }
    document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .map(|schemas| (SchemaSection::Components, schemas))
}
