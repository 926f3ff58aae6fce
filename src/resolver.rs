//! Canonical type resolution.
//!
//! Resolves any schema node, possibly a reference, possibly nested, to a
//! target-agnostic [`TypeDescriptor`] tree. All bookkeeping lives in an
//! explicit per-run [`ResolveContext`]: the registry of named types (dedup),
//! the in-progress set (cycle guard), and the recorded warnings. Nothing is
//! shared between runs.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::config::{DateRepr, EnumNaming, GeneratorOptions};
use crate::error::{Warning, W_ENUM_DESCRIPTION, W_UNRESOLVED_REF};
use crate::naming::{pascal_case, synthesize_member_name};
use crate::schema::{
    Additional, ArrayConstraints, Items, NumericConstraints, SchemaNode, Shape, StringConstraints,
    StringFormat,
};
use crate::store::SchemaStore;

/// The target-agnostic kind of a resolved type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Boolean,
    Integer,
    Number,
    String,
    /// Temporal date (date representation configured as temporal).
    Date,
    /// Temporal instant.
    DateTime,
    /// Byte-blob shape (`binary` / `byte` formats).
    Binary,
    /// Closed union of string literals.
    StringEnum(Vec<String>),
    /// Named enumeration with explicit member names.
    Enumeration {
        name: String,
        members: Vec<EnumMember>,
    },
    Array(Box<TypeDescriptor>),
    /// Positional element types from schema-array `items`.
    Tuple(Vec<TypeDescriptor>),
    /// Keyed map with a uniform value type.
    Map(Box<TypeDescriptor>),
    /// Object that permits no dynamic keys (`additionalProperties: false`
    /// with no declared properties).
    ClosedObject,
    Object(Vec<PropertyDescriptor>),
    /// Logical OR of members (`oneOf` / `anyOf`).
    Union(Vec<TypeDescriptor>),
    /// Logical AND of members (`allOf`).
    Intersection(Vec<TypeDescriptor>),
    /// Reference to a registered named type.
    Named(String),
    /// Unconstrained value.
    Any,
    /// Sentinel for an unresolvable reference. Generation continues.
    Unknown,
}

/// One member of a named enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Value,
}

/// Validation constraints carried alongside the kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraints {
    pub string: StringConstraints,
    pub number: NumericConstraints,
    pub array: ArrayConstraints,
}

impl Constraints {
    fn for_string(constraints: StringConstraints) -> Constraints {
        Constraints {
            string: constraints,
            ..Default::default()
        }
    }

    fn for_number(constraints: NumericConstraints) -> Constraints {
        Constraints {
            number: constraints,
            ..Default::default()
        }
    }

    fn for_array(constraints: ArrayConstraints) -> Constraints {
        Constraints {
            array: constraints,
            ..Default::default()
        }
    }
}

/// Canonical description of one resolved type.
///
/// Created on first visit to a node; never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    /// Orthogonal modifier applied after the base kind.
    pub nullable: bool,
    /// Original string format, retained for control selection even when the
    /// date representation keeps the textual kind.
    pub format: Option<StringFormat>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub constraints: Constraints,
}

impl TypeDescriptor {
    fn of(kind: TypeKind) -> TypeDescriptor {
        TypeDescriptor {
            kind,
            nullable: false,
            format: None,
            description: None,
            default: None,
            constraints: Constraints::default(),
        }
    }

    /// The unknown sentinel.
    pub fn unknown() -> TypeDescriptor {
        TypeDescriptor::of(TypeKind::Unknown)
    }
}

/// One property of a resolved object type, with its own requiredness derived
/// from the parent's required list.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub required: bool,
    pub read_only: bool,
    pub descriptor: TypeDescriptor,
}

/// Per-run resolution state.
///
/// Owns the visited/registered name set; scoping it to one run (instead of a
/// shared singleton) is what makes repeated generation idempotent.
pub struct ResolveContext<'a> {
    store: &'a SchemaStore,
    options: &'a GeneratorOptions,
    registered: IndexMap<String, TypeDescriptor>,
    in_progress: IndexSet<String>,
    warnings: Vec<Warning>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(store: &'a SchemaStore, options: &'a GeneratorOptions) -> ResolveContext<'a> {
        ResolveContext {
            store,
            options,
            registered: IndexMap::new(),
            in_progress: IndexSet::new(),
            warnings: Vec::new(),
        }
    }

    /// The store this run resolves against.
    pub fn store(&self) -> &'a SchemaStore {
        self.store
    }

    /// The configuration threaded through this run.
    pub fn options(&self) -> &'a GeneratorOptions {
        self.options
    }

    /// Named types registered so far, in first-use order.
    pub fn registered(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.registered
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Look up one registered named type.
    pub fn registered_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.registered.get(name)
    }

    /// Warnings recorded during this run.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn warn(&mut self, code: &'static str, path: &str, message: String) {
        self.warnings.push(Warning {
            code,
            path: path.to_string(),
            message,
        });
    }

    /// Resolve a named definition, registering it (and everything it
    /// references) on first use. Returns a `Named` descriptor; re-entry
    /// during a cycle yields the same forward reference instead of
    /// recursing.
    pub fn resolve_named(&mut self, name: &str) -> TypeDescriptor {
        if self.registered.contains_key(name) || self.in_progress.contains(name) {
            return TypeDescriptor::of(TypeKind::Named(name.to_string()));
        }

        let Some(node) = self.store.get(name).cloned() else {
            self.warn(
                W_UNRESOLVED_REF,
                &format!("/{}", name),
                format!("no definition named \"{}\"", name),
            );
            return TypeDescriptor::unknown();
        };

        self.in_progress.insert(name.to_string());
        let descriptor = self.resolve(&node, &format!("/{}", name));
        self.in_progress.shift_remove(name);
        // A cycle may already have registered the forward reference target.
        self.registered
            .entry(name.to_string())
            .or_insert(descriptor);

        TypeDescriptor::of(TypeKind::Named(name.to_string()))
    }

    /// Resolve a schema node to its canonical descriptor.
    ///
    /// `path` is carried for diagnostics only. Resolution never fails: an
    /// unresolvable reference degrades to the unknown sentinel with a
    /// recorded warning.
    pub fn resolve(&mut self, node: &SchemaNode, path: &str) -> TypeDescriptor {
        let mut descriptor = match &node.shape {
            Shape::Reference(reference) => self.resolve_reference(reference, path),
            Shape::Boolean => TypeDescriptor::of(TypeKind::Boolean),
            Shape::Integer(constraints) => TypeDescriptor {
                constraints: Constraints::for_number(*constraints),
                ..TypeDescriptor::of(TypeKind::Integer)
            },
            Shape::Number(constraints) => TypeDescriptor {
                constraints: Constraints::for_number(*constraints),
                ..TypeDescriptor::of(TypeKind::Number)
            },
            Shape::String {
                format,
                constraints,
            } => self.resolve_string(*format, constraints.clone()),
            Shape::Enum {
                values,
                string_valued,
            } => self.resolve_enum(node, values, *string_valued, path),
            Shape::Array { items, constraints } => {
                let kind = match items {
                    Items::Single(element) => {
                        let element = self.resolve(element, &format!("{}/items", path));
                        TypeKind::Array(Box::new(element))
                    }
                    Items::Tuple(members) => TypeKind::Tuple(
                        members
                            .iter()
                            .enumerate()
                            .map(|(i, m)| self.resolve(m, &format!("{}/items/{}", path, i)))
                            .collect(),
                    ),
                    Items::Untyped => {
                        TypeKind::Array(Box::new(TypeDescriptor::of(TypeKind::Any)))
                    }
                };
                TypeDescriptor {
                    constraints: Constraints::for_array(*constraints),
                    ..TypeDescriptor::of(kind)
                }
            }
            Shape::Object {
                properties,
                required,
                additional,
            } => self.resolve_object(properties, required, additional, path),
            Shape::AllOf(members) => self.resolve_composition(members, path, true),
            Shape::OneOf(members) | Shape::AnyOf(members) => {
                self.resolve_composition(members, path, false)
            }
            Shape::Any => TypeDescriptor::of(TypeKind::Any),
        };

        descriptor.nullable |= node.nullable;
        if descriptor.description.is_none() {
            descriptor.description = node.description.clone();
        }
        if descriptor.default.is_none() {
            descriptor.default = node.default.clone();
        }
        descriptor
    }

    fn resolve_reference(&mut self, reference: &str, path: &str) -> TypeDescriptor {
        match self.store.resolve_reference(reference) {
            Some((name, _)) => {
                let name = name.to_string();
                self.resolve_named(&name)
            }
            None => {
                self.warn(
                    W_UNRESOLVED_REF,
                    path,
                    format!("unresolvable reference \"{}\"", reference),
                );
                TypeDescriptor::unknown()
            }
        }
    }

    fn resolve_string(
        &self,
        format: Option<StringFormat>,
        constraints: StringConstraints,
    ) -> TypeDescriptor {
        let kind = match format {
            Some(StringFormat::Binary) | Some(StringFormat::Byte) => TypeKind::Binary,
            Some(StringFormat::Date) if self.options.date_repr == DateRepr::Temporal => {
                TypeKind::Date
            }
            Some(StringFormat::DateTime) if self.options.date_repr == DateRepr::Temporal => {
                TypeKind::DateTime
            }
            _ => TypeKind::String,
        };
        TypeDescriptor {
            format,
            constraints: Constraints::for_string(constraints),
            ..TypeDescriptor::of(kind)
        }
    }

    fn resolve_enum(
        &mut self,
        node: &SchemaNode,
        values: &[Value],
        string_valued: bool,
        path: &str,
    ) -> TypeDescriptor {
        if string_valued {
            let literals = values
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect();
            return TypeDescriptor::of(TypeKind::StringEnum(literals));
        }

        let name = node
            .title
            .as_deref()
            .map(pascal_case)
            .unwrap_or_else(|| enum_name_from_path(path));

        let members = self.enum_members(node, values, path);
        TypeDescriptor::of(TypeKind::Enumeration { name, members })
    }

    /// Member names come from a structured description when that mode is
    /// enabled, otherwise they are synthesized from each literal. A
    /// description that fails to parse falls back to synthesis with a
    /// warning, never an error.
    fn enum_members(&mut self, node: &SchemaNode, values: &[Value], path: &str) -> Vec<EnumMember> {
        if self.options.enum_naming == EnumNaming::Description {
            if let Some(description) = node.description.as_deref() {
                match parse_enum_description(description, values) {
                    Some(members) => return members,
                    None => self.warn(
                        W_ENUM_DESCRIPTION,
                        path,
                        "structured enum description did not parse; member names synthesized"
                            .to_string(),
                    ),
                }
            }
        }
        values
            .iter()
            .map(|value| EnumMember {
                name: synthesize_member_name(value),
                value: value.clone(),
            })
            .collect()
    }

    fn resolve_object(
        &mut self,
        properties: &[(String, SchemaNode)],
        required: &[String],
        additional: &Additional,
        path: &str,
    ) -> TypeDescriptor {
        if !properties.is_empty() {
            let resolved = properties
                .iter()
                .map(|(name, prop)| PropertyDescriptor {
                    name: name.clone(),
                    required: required.iter().any(|r| r == name),
                    read_only: prop.read_only,
                    descriptor: self.resolve(prop, &format!("{}/properties/{}", path, name)),
                })
                .collect();
            return TypeDescriptor::of(TypeKind::Object(resolved));
        }

        match additional {
            Additional::Schema(value_schema) => {
                let value =
                    self.resolve(value_schema, &format!("{}/additionalProperties", path));
                TypeDescriptor::of(TypeKind::Map(Box::new(value)))
            }
            Additional::Closed => TypeDescriptor::of(TypeKind::ClosedObject),
            Additional::Open => {
                TypeDescriptor::of(TypeKind::Map(Box::new(TypeDescriptor::of(TypeKind::Any))))
            }
        }
    }

    /// `allOf` composes with AND, `oneOf`/`anyOf` with OR. Degenerate "any"
    /// members are filtered first; a single survivor collapses to itself.
    fn resolve_composition(
        &mut self,
        members: &[SchemaNode],
        path: &str,
        conjunction: bool,
    ) -> TypeDescriptor {
        let mut resolved: Vec<TypeDescriptor> = members
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_any())
            .map(|(i, m)| self.resolve(m, &format!("{}/{}", path, i)))
            .collect();

        match resolved.len() {
            0 => TypeDescriptor::of(TypeKind::Any),
            1 => resolved.remove(0),
            _ if conjunction => TypeDescriptor::of(TypeKind::Intersection(resolved)),
            _ => TypeDescriptor::of(TypeKind::Union(resolved)),
        }
    }

    /// Follow `Named` links to the registered descriptor underneath.
    ///
    /// Alias chains are bounded by the registry size, so a visited set is
    /// enough to stop malformed self-aliases.
    pub fn dereference<'d>(&'d self, descriptor: &'d TypeDescriptor) -> &'d TypeDescriptor {
        let mut current = descriptor;
        let mut seen = IndexSet::new();
        while let TypeKind::Named(name) = &current.kind {
            if !seen.insert(name.clone()) {
                break;
            }
            match self.registered.get(name) {
                Some(target) => current = target,
                None => break,
            }
        }
        current
    }
}

/// Derive an enumeration name from the diagnostic path's last segment.
fn enum_name_from_path(path: &str) -> String {
    let segment = path
        .rsplit('/')
        .find(|s| !s.is_empty() && !s.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or("Enum");
    format!("{}Enum", pascal_case(segment))
}

/// Parse a structured `Name = value` list from an enum description.
///
/// Accepts comma- or newline-separated pairs; every literal must be covered
/// exactly once or the whole description is rejected as ambiguous.
fn parse_enum_description(description: &str, values: &[Value]) -> Option<Vec<EnumMember>> {
    let mut members = Vec::new();
    for part in description.split([',', '\n']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, value) = part.split_once('=')?;
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || !crate::naming::is_valid_identifier(name) {
            return None;
        }
        let parsed: Value = serde_json::from_str(value).ok()?;
        members.push(EnumMember {
            name: name.to_string(),
            value: parsed,
        });
    }

    if members.len() != values.len() {
        return None;
    }
    for value in values {
        if !members.iter().any(|m| &m.value == value) {
            return None;
        }
    }
    Some(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use serde_json::json;

    fn store(definitions: Value) -> SchemaStore {
        SchemaStore::from_document(&json!({ "definitions": definitions })).unwrap()
    }

    #[test]
    fn resolve_named_registers_once() {
        let store = store(json!({
            "Post": {
                "type": "object",
                "properties": { "title": { "type": "string", "minLength": 5 } },
                "required": ["title"]
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        let first = ctx.resolve_named("Post");
        let second = ctx.resolve_named("Post");
        assert_eq!(first, second);
        assert_eq!(ctx.registered().count(), 1);
    }

    #[test]
    fn references_register_dependencies_first() {
        let store = store(json!({
            "Post": {
                "type": "object",
                "properties": { "author": { "$ref": "#/definitions/Author" } }
            },
            "Author": { "type": "object", "properties": { "name": { "type": "string" } } }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Post");
        let names: Vec<&str> = ctx.registered().map(|(n, _)| n).collect();
        assert!(names.contains(&"Author"), "dependency registered: {names:?}");
        assert!(names.contains(&"Post"));
    }

    #[test]
    fn self_referential_cycle_terminates() {
        let store = store(json!({
            "A": {
                "type": "object",
                "properties": { "next": { "$ref": "#/definitions/A" } }
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("A");
        let a = ctx.registered_type("A").unwrap();
        match &a.kind {
            TypeKind::Object(props) => {
                assert_eq!(props[0].descriptor.kind, TypeKind::Named("A".into()));
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn cycle_inside_composition_terminates() {
        let store = store(json!({
            "Node": {
                "allOf": [
                    { "type": "object", "properties": { "id": { "type": "string" } } },
                    { "type": "object", "properties": { "parent": { "$ref": "#/definitions/Node" } } }
                ]
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Node");
        assert!(ctx.registered_type("Node").is_some());
    }

    #[test]
    fn unresolvable_reference_degrades_with_warning() {
        let store = store(json!({
            "Post": {
                "type": "object",
                "properties": { "author": { "$ref": "#/definitions/Missing" } }
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Post");
        let post = ctx.registered_type("Post").unwrap();
        match &post.kind {
            TypeKind::Object(props) => {
                assert_eq!(props[0].descriptor.kind, TypeKind::Unknown);
            }
            other => panic!("expected object, got {:?}", other),
        }
        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(ctx.warnings()[0].code, W_UNRESOLVED_REF);
    }

    #[test]
    fn all_of_filters_any_and_collapses_single() {
        let store = store(json!({
            "Mixed": {
                "allOf": [ {}, { "type": "string" } ]
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Mixed");
        assert_eq!(ctx.registered_type("Mixed").unwrap().kind, TypeKind::String);
    }

    #[test]
    fn one_of_becomes_union() {
        let store = store(json!({
            "Pet": {
                "oneOf": [
                    { "$ref": "#/definitions/Cat" },
                    { "$ref": "#/definitions/Dog" }
                ]
            },
            "Cat": { "type": "object", "properties": { "meow": { "type": "boolean" } } },
            "Dog": { "type": "object", "properties": { "bark": { "type": "boolean" } } }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Pet");
        match &ctx.registered_type("Pet").unwrap().kind {
            TypeKind::Union(members) => assert_eq!(members.len(), 2),
            other => panic!("expected union, got {:?}", other),
        }
    }

    #[test]
    fn string_enum_is_literal_union() {
        let store = store(json!({
            "Status": { "type": "string", "enum": ["draft", "published", "archived"] }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Status");
        assert_eq!(
            ctx.registered_type("Status").unwrap().kind,
            TypeKind::StringEnum(vec![
                "draft".into(),
                "published".into(),
                "archived".into()
            ])
        );
    }

    #[test]
    fn numeric_enum_synthesizes_member_names() {
        let store = store(json!({
            "Level": { "type": "integer", "enum": [1, 2, 3] }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Level");
        match &ctx.registered_type("Level").unwrap().kind {
            TypeKind::Enumeration { name, members } => {
                assert_eq!(name, "LevelEnum");
                assert_eq!(members[0].name, "Value1");
            }
            other => panic!("expected enumeration, got {:?}", other),
        }
    }

    #[test]
    fn numeric_enum_names_from_description() {
        let store = store(json!({
            "Level": {
                "type": "integer",
                "enum": [1, 2],
                "description": "Low = 1, High = 2"
            }
        }));
        let options = GeneratorOptions::new().enum_naming(EnumNaming::Description);
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Level");
        match &ctx.registered_type("Level").unwrap().kind {
            TypeKind::Enumeration { members, .. } => {
                assert_eq!(members[0].name, "Low");
                assert_eq!(members[1].value, json!(2));
            }
            other => panic!("expected enumeration, got {:?}", other),
        }
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn malformed_enum_description_falls_back_with_warning() {
        let store = store(json!({
            "Level": {
                "type": "integer",
                "enum": [1, 2],
                "description": "just prose, not a member list"
            }
        }));
        let options = GeneratorOptions::new().enum_naming(EnumNaming::Description);
        let mut ctx = ResolveContext::new(&store, &options);

        ctx.resolve_named("Level");
        match &ctx.registered_type("Level").unwrap().kind {
            TypeKind::Enumeration { members, .. } => assert_eq!(members[0].name, "Value1"),
            other => panic!("expected enumeration, got {:?}", other),
        }
        assert_eq!(ctx.warnings()[0].code, W_ENUM_DESCRIPTION);
    }

    #[test]
    fn date_representation_switches_kind() {
        let node = SchemaNode::parse(&json!({ "type": "string", "format": "date-time" }));
        let store = store(json!({}));

        let textual = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &textual);
        let descriptor = ctx.resolve(&node, "/test");
        assert_eq!(descriptor.kind, TypeKind::String);
        assert_eq!(descriptor.format, Some(StringFormat::DateTime));

        let temporal = GeneratorOptions::new().date_repr(DateRepr::Temporal);
        let mut ctx = ResolveContext::new(&store, &temporal);
        assert_eq!(ctx.resolve(&node, "/test").kind, TypeKind::DateTime);
    }

    #[test]
    fn object_shapes_without_properties() {
        let store = store(json!({}));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        let keyed = SchemaNode::parse(&json!({
            "type": "object",
            "additionalProperties": { "type": "integer" }
        }));
        match ctx.resolve(&keyed, "/t").kind {
            TypeKind::Map(value) => assert_eq!(value.kind, TypeKind::Integer),
            other => panic!("expected map, got {:?}", other),
        }

        let closed = SchemaNode::parse(&json!({
            "type": "object",
            "additionalProperties": false
        }));
        assert_eq!(ctx.resolve(&closed, "/t").kind, TypeKind::ClosedObject);

        let open = SchemaNode::parse(&json!({ "type": "object" }));
        assert!(matches!(ctx.resolve(&open, "/t").kind, TypeKind::Map(_)));
    }

    #[test]
    fn nullability_is_orthogonal() {
        let store = store(json!({}));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        let node = SchemaNode::parse(&json!({ "type": "string", "nullable": true }));
        let descriptor = ctx.resolve(&node, "/t");
        assert_eq!(descriptor.kind, TypeKind::String);
        assert!(descriptor.nullable);
    }

    #[test]
    fn tuple_items_preserve_positions() {
        let store = store(json!({}));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        let node = SchemaNode::parse(&json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "integer" }]
        }));
        match ctx.resolve(&node, "/t").kind {
            TypeKind::Tuple(members) => {
                assert_eq!(members[0].kind, TypeKind::String);
                assert_eq!(members[1].kind, TypeKind::Integer);
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn resolving_twice_yields_identical_descriptor() {
        let store = store(json!({
            "Post": {
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                }
            }
        }));
        let options = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &options);

        let node = store.get("Post").unwrap().clone();
        let first = ctx.resolve(&node, "/Post");
        let second = ctx.resolve(&node, "/Post");
        assert_eq!(first, second);
    }

    #[test]
    fn parse_enum_description_rejects_partial_coverage() {
        let values = vec![json!(1), json!(2), json!(3)];
        assert!(parse_enum_description("Low = 1, High = 2", &values).is_none());
        assert!(parse_enum_description("Low = 1, Mid = 2, High = 3", &values).is_some());
    }
}
