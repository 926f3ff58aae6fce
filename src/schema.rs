//! Schema node model.
//!
//! Raw definitions from the document graph are duck-typed JSON maps with
//! optional fields. They are decided once, at parse time, into a tagged
//! [`Shape`] variant so that the resolver and emitters can match
//! exhaustively instead of probing fields ad hoc.

use serde_json::{Map, Value};

/// String formats that influence resolution and control selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Date,
    DateTime,
    Binary,
    Byte,
    Password,
    Multiline,
}

impl StringFormat {
    /// Parse a `format` value. Unknown formats carry no meaning here.
    pub fn parse(s: &str) -> Option<StringFormat> {
        match s {
            "date" => Some(StringFormat::Date),
            "date-time" => Some(StringFormat::DateTime),
            "binary" => Some(StringFormat::Binary),
            "byte" => Some(StringFormat::Byte),
            "password" => Some(StringFormat::Password),
            "textarea" | "multiline" => Some(StringFormat::Multiline),
            _ => None,
        }
    }
}

/// Numeric range constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericConstraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub multiple_of: Option<f64>,
}

/// String length and pattern constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringConstraints {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
}

/// Array cardinality constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArrayConstraints {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

/// The `items` value of an array schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// Single schema applied to every element.
    Single(Box<SchemaNode>),
    /// Schema-array form: positional element types.
    Tuple(Vec<SchemaNode>),
    /// No `items` declared.
    Untyped,
}

/// The `additionalProperties` value of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Additional {
    /// Missing or `true`: open map.
    Open,
    /// Explicitly `false`: no dynamic keys.
    Closed,
    /// A schema constraining dynamic values.
    Schema(Box<SchemaNode>),
}

/// The structural shape of a schema node, decided once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// `$ref` — the raw reference string, resolved through the store.
    Reference(String),
    Boolean,
    Integer(NumericConstraints),
    Number(NumericConstraints),
    String {
        format: Option<StringFormat>,
        constraints: StringConstraints,
    },
    Enum {
        values: Vec<Value>,
        /// True when every literal is a string.
        string_valued: bool,
    },
    Array {
        items: Items,
        constraints: ArrayConstraints,
    },
    Object {
        /// Declaration order preserved.
        properties: Vec<(String, SchemaNode)>,
        required: Vec<String>,
        additional: Additional,
    },
    AllOf(Vec<SchemaNode>),
    OneOf(Vec<SchemaNode>),
    AnyOf(Vec<SchemaNode>),
    /// Empty schema: matches anything.
    Any,
}

/// One definition from the API description graph.
///
/// Shape plus the orthogonal modifiers that apply to any shape. Immutable
/// after parsing; owned by the [`SchemaStore`](crate::SchemaStore).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub shape: Shape,
    /// Nullability is a modifier, not a separate shape.
    pub nullable: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub read_only: bool,
}

impl SchemaNode {
    /// The unconstrained schema.
    pub fn any() -> SchemaNode {
        SchemaNode {
            shape: Shape::Any,
            nullable: false,
            title: None,
            description: None,
            default: None,
            read_only: false,
        }
    }

    /// True for degenerate "matches anything" members inside compositions.
    pub fn is_any(&self) -> bool {
        matches!(self.shape, Shape::Any)
    }

    /// Parse a raw schema value into a tagged node.
    ///
    /// Never fails: malformed fragments degrade to [`Shape::Any`] and are
    /// reported downstream by the resolver, not here.
    pub fn parse(value: &Value) -> SchemaNode {
        let Value::Object(map) = value else {
            return SchemaNode::any();
        };

        let nullable = is_nullable(map);
        let shape = parse_shape(map);

        SchemaNode {
            shape,
            nullable,
            title: str_field(map, "title"),
            description: str_field(map, "description"),
            default: map.get("default").cloned(),
            read_only: bool_field(map, "readOnly"),
        }
    }
}

fn parse_shape(map: &Map<String, Value>) -> Shape {
    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        return Shape::Reference(reference.to_string());
    }

    if let Some(values) = map.get("enum").and_then(Value::as_array) {
        let string_valued = !values.is_empty() && values.iter().all(Value::is_string);
        return Shape::Enum {
            values: values.clone(),
            string_valued,
        };
    }

    if let Some(members) = schema_list(map, "allOf") {
        return Shape::AllOf(members);
    }
    if let Some(members) = schema_list(map, "oneOf") {
        return Shape::OneOf(members);
    }
    if let Some(members) = schema_list(map, "anyOf") {
        return Shape::AnyOf(members);
    }

    match declared_type(map) {
        Some("boolean") => Shape::Boolean,
        Some("integer") => Shape::Integer(numeric_constraints(map)),
        Some("number") => Shape::Number(numeric_constraints(map)),
        Some("string") => Shape::String {
            format: str_field(map, "format").and_then(|f| StringFormat::parse(&f)),
            constraints: StringConstraints {
                min_length: u64_field(map, "minLength"),
                max_length: u64_field(map, "maxLength"),
                pattern: str_field(map, "pattern"),
            },
        },
        Some("array") => Shape::Array {
            items: parse_items(map),
            constraints: ArrayConstraints {
                min_items: u64_field(map, "minItems"),
                max_items: u64_field(map, "maxItems"),
                unique_items: bool_field(map, "uniqueItems"),
            },
        },
        Some("object") => parse_object(map),
        // No declared type: structural keywords still imply a shape.
        None if map.contains_key("properties") || map.contains_key("additionalProperties") => {
            parse_object(map)
        }
        None if map.contains_key("items") => Shape::Array {
            items: parse_items(map),
            constraints: ArrayConstraints::default(),
        },
        _ => Shape::Any,
    }
}

fn parse_object(map: &Map<String, Value>) -> Shape {
    let properties = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| (name.clone(), SchemaNode::parse(prop)))
                .collect()
        })
        .unwrap_or_default();

    let required = map
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let additional = match map.get("additionalProperties") {
        Some(Value::Bool(false)) => Additional::Closed,
        Some(schema @ Value::Object(_)) => {
            Additional::Schema(Box::new(SchemaNode::parse(schema)))
        }
        _ => Additional::Open,
    };

    Shape::Object {
        properties,
        required,
        additional,
    }
}

fn parse_items(map: &Map<String, Value>) -> Items {
    match map.get("items") {
        Some(Value::Array(entries)) => {
            Items::Tuple(entries.iter().map(SchemaNode::parse).collect())
        }
        Some(item @ Value::Object(_)) => Items::Single(Box::new(SchemaNode::parse(item))),
        _ => Items::Untyped,
    }
}

/// Declared `type`, ignoring a `"null"` entry in the array form.
fn declared_type(map: &Map<String, Value>) -> Option<&str> {
    match map.get("type") {
        Some(Value::String(t)) => Some(t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

fn is_nullable(map: &Map<String, Value>) -> bool {
    // OpenAPI 3.0 `nullable`, Swagger extension `x-nullable`,
    // or JSON Schema type-array form `["string", "null"]`.
    if bool_field(map, "nullable") || bool_field(map, "x-nullable") {
        return true;
    }
    matches!(
        map.get("type"),
        Some(Value::Array(types)) if types.iter().any(|t| t.as_str() == Some("null"))
    )
}

fn numeric_constraints(map: &Map<String, Value>) -> NumericConstraints {
    NumericConstraints {
        minimum: f64_field(map, "minimum"),
        maximum: f64_field(map, "maximum"),
        exclusive_minimum: bool_field(map, "exclusiveMinimum"),
        exclusive_maximum: bool_field(map, "exclusiveMaximum"),
        multiple_of: f64_field(map, "multipleOf"),
    }
}

fn schema_list(map: &Map<String, Value>, key: &str) -> Option<Vec<SchemaNode>> {
    let entries = map.get(key)?.as_array()?;
    Some(entries.iter().map(SchemaNode::parse).collect())
}

fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(String::from)
}

fn bool_field(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn u64_field(map: &Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

fn f64_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}
