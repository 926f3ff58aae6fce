//! Operation extraction - flattens the document's path map into a list of
//! operation descriptors.
//!
//! Handles both Swagger 2.0 (body parameters, response `schema`) and
//! OpenAPI 3.x (`requestBody`, response `content`) conventions so the
//! discovery engine stays version-agnostic.

use serde_json::{Map, Value};

use crate::config::ParamLocation;
use crate::error::{Warning, W_SKIPPED_OPERATION};
use crate::schema::SchemaNode;

/// HTTP methods the generator recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn parse(s: &str) -> Option<Method> {
        match s {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "patch" => Some(Method::Patch),
            "delete" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One non-body parameter of an operation.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: SchemaNode,
}

/// One HTTP operation, read-only after extraction.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub path: String,
    pub method: Method,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body schema (v2 body parameter or v3 requestBody).
    pub request_schema: Option<SchemaNode>,
    /// Response schemas keyed by status code string.
    pub responses: Vec<(String, SchemaNode)>,
}

impl OperationDescriptor {
    /// First tag, if any. Discovery groups by this.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// True when the path ends in a `{param}` segment (item-shaped).
    pub fn is_item_path(&self) -> bool {
        is_item_path(&self.path)
    }

    /// Name of the trailing path parameter, for item-shaped paths.
    pub fn trailing_parameter(&self) -> Option<&str> {
        let last = self.path.rsplit('/').next()?;
        last.strip_prefix('{')?.strip_suffix('}')
    }

    /// Schema of the first 2xx response, if declared.
    pub fn success_response(&self) -> Option<&SchemaNode> {
        self.responses
            .iter()
            .find(|(status, _)| status.starts_with('2'))
            .map(|(_, schema)| schema)
    }
}

/// True when a path's trailing segment is a path parameter.
pub fn is_item_path(path: &str) -> bool {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.starts_with('{') && segment.ends_with('}'))
}

/// Flatten the document's path map into operation descriptors.
///
/// Path-level parameters are merged into every operation under the path.
/// Malformed entries are skipped with a recorded warning, never an error.
pub fn extract_operations(document: &Value, warnings: &mut Vec<Warning>) -> Vec<OperationDescriptor> {
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut operations = Vec::new();
    for (path, entry) in paths {
        let Some(entry) = entry.as_object() else {
            warnings.push(Warning {
                code: W_SKIPPED_OPERATION,
                path: format!("/paths/{}", path),
                message: "path entry is not an object".to_string(),
            });
            continue;
        };

        let shared_parameters = entry
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| parse_parameters(params))
            .unwrap_or_default();

        for (key, raw) in entry {
            let Some(method) = Method::parse(key) else {
                continue;
            };
            let Some(operation) = raw.as_object() else {
                warnings.push(Warning {
                    code: W_SKIPPED_OPERATION,
                    path: format!("/paths/{}/{}", path, key),
                    message: "operation entry is not an object".to_string(),
                });
                continue;
            };
            operations.push(parse_operation(path, method, operation, &shared_parameters));
        }
    }
    operations
}

fn parse_operation(
    path: &str,
    method: Method,
    operation: &Map<String, Value>,
    shared_parameters: &[(ParameterDescriptor, bool)],
) -> OperationDescriptor {
    let own = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| parse_parameters(params))
        .unwrap_or_default();

    let mut parameters: Vec<ParameterDescriptor> = Vec::new();
    let mut request_schema = None;

    // Operation-level parameters come second and override a path-level
    // parameter with the same name and location.
    for (param, is_body) in shared_parameters.iter().cloned().chain(own) {
        if is_body {
            request_schema = Some(param.schema);
        } else if let Some(existing) = parameters
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            *existing = param;
        } else {
            parameters.push(param);
        }
    }

    // v3 requestBody overrides a v2-style body parameter if both appear.
    if let Some(schema) = request_body_schema(operation) {
        request_schema = Some(schema);
    }

    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    let responses = operation
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .filter_map(|(status, entry)| {
                    response_schema(entry).map(|schema| (status.clone(), schema))
                })
                .collect()
        })
        .unwrap_or_default();

    OperationDescriptor {
        path: path.to_string(),
        method,
        operation_id: operation
            .get("operationId")
            .and_then(Value::as_str)
            .map(String::from),
        summary: operation
            .get("summary")
            .and_then(Value::as_str)
            .map(String::from),
        tags,
        parameters,
        request_schema,
        responses,
    }
}

/// Parse a parameter list. The boolean marks v2 body parameters, which
/// become the request schema instead of a regular parameter.
fn parse_parameters(params: &[Value]) -> Vec<(ParameterDescriptor, bool)> {
    params
        .iter()
        .filter_map(|param| {
            let map = param.as_object()?;
            let name = map.get("name").and_then(Value::as_str)?.to_string();
            let location = map.get("in").and_then(Value::as_str)?;
            let required = map
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(location == "path");

            let (location, is_body) = match location {
                "path" => (ParamLocation::Path, false),
                "query" => (ParamLocation::Query, false),
                "header" => (ParamLocation::Header, false),
                "body" => (ParamLocation::Body, true),
                _ => return None,
            };

            // v2 body parameters carry `schema`; others are inline schemas.
            let schema = match map.get("schema") {
                Some(schema) => SchemaNode::parse(schema),
                None => SchemaNode::parse(param),
            };

            Some((
                ParameterDescriptor {
                    name,
                    location,
                    required,
                    schema,
                },
                is_body,
            ))
        })
        .collect()
}

/// v3 `requestBody.content.<media>.schema`, preferring JSON media types.
fn request_body_schema(operation: &Map<String, Value>) -> Option<SchemaNode> {
    let content = operation.get("requestBody")?.get("content")?.as_object()?;
    media_schema(content)
}

fn response_schema(entry: &Value) -> Option<SchemaNode> {
    // v2: responses.<status>.schema
    if let Some(schema) = entry.get("schema") {
        return Some(SchemaNode::parse(schema));
    }
    // v3: responses.<status>.content.<media>.schema
    let content = entry.get("content")?.as_object()?;
    media_schema(content)
}

fn media_schema(content: &Map<String, Value>) -> Option<SchemaNode> {
    let entry = content
        .iter()
        .find(|(media, _)| media.starts_with("application/json"))
        .map(|(_, v)| v)
        .or_else(|| content.values().next())?;
    entry.get("schema").map(SchemaNode::parse)
}
