//! Resource discovery - reconstructs CRUD resources from the flat operation
//! list by pattern-matching paths and tags.
//!
//! Each tag group is classified into at most one operation per role
//! (create/list/read/update/delete, claimed greedily in that order); anything
//! unclaimed becomes a custom action. A group yields a resource only when it
//! has at least one of list/create/read, or at least one custom action.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::naming::{camel_case, pluralize, singularize, strip_model_prefix, title_case};
use crate::operations::{Method, OperationDescriptor};
use crate::resolver::{PropertyDescriptor, ResolveContext, TypeKind};
use crate::schema::Shape;
use crate::store::reference_name;

/// Hint printed when a document yields no viable resources.
pub const MIN_SHAPE_HINT: &str = "a resource needs a tagged operation group with at least one of: \
     GET on a collection path (list), POST on a collection path (create), \
     or GET on an item path (read)";

/// Name variants for one resource.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceNames {
    pub singular: String,
    pub plural: String,
    pub title: String,
}

impl ResourceNames {
    fn from_tag(tag: &str) -> ResourceNames {
        let singular = singularize(tag);
        ResourceNames {
            plural: pluralize(&singular),
            title: title_case(&singular),
            singular,
        }
    }
}

/// One claimed CRUD role with the details emission needs.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRole {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Trailing path parameter for item-shaped roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_parameter: Option<String>,
}

impl OperationRole {
    fn from_operation(op: &OperationDescriptor) -> OperationRole {
        OperationRole {
            method: op.method.as_str().to_string(),
            path: op.path.clone(),
            operation_id: op.operation_id.clone(),
            id_parameter: op.trailing_parameter().map(String::from),
        }
    }
}

/// Whether a custom action targets the collection or a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLevel {
    Collection,
    Item,
}

/// An operation that matched no CRUD role.
#[derive(Debug, Clone, Serialize)]
pub struct CustomAction {
    pub name: String,
    pub method: String,
    pub path: String,
    pub level: ActionLevel,
}

/// One column of the generated list view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListColumn {
    pub name: String,
    pub label: String,
}

/// One inferred CRUD entity, grouped by tag.
///
/// Created once during discovery, consumed once by emission.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceModel {
    pub names: ResourceNames,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<OperationRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<OperationRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<OperationRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<OperationRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<OperationRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<CustomAction>,
    /// Present when create or update was claimed.
    pub editable: bool,
    /// Schema name backing the editable form, when reference-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable_model: Option<String>,
    /// Schema name backing list/detail projections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_model: Option<String>,
    /// Ordered writable-form properties; empty when no reference-backed
    /// create schema exists.
    #[serde(skip)]
    pub form_properties: Vec<PropertyDescriptor>,
    pub list_columns: Vec<ListColumn>,
}

/// Discovery knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryOptions {
    /// Require the list role's success response to be array-typed.
    pub require_array_list_response: bool,
}

/// Infer CRUD resources from the operation list.
///
/// Consumes the resolver for property-level metadata (form properties and
/// list columns); every schema touched here lands in the context's named
/// registry like any other resolution.
pub fn discover_resources(
    ctx: &mut ResolveContext<'_>,
    operations: &[OperationDescriptor],
    options: &DiscoveryOptions,
) -> Vec<ResourceModel> {
    let mut groups: IndexMap<&str, Vec<&OperationDescriptor>> = IndexMap::new();
    for op in operations {
        let Some(tag) = op.primary_tag() else {
            continue;
        };
        // Tags containing a separator denote nested groupings, not resources.
        if tag.is_empty() || tag.contains('/') {
            continue;
        }
        groups.entry(tag).or_default().push(op);
    }

    let mut resources = Vec::new();
    for (tag, group) in groups {
        if let Some(resource) = discover_group(ctx, tag, &group, options) {
            resources.push(resource);
        }
    }
    resources
}

fn discover_group(
    ctx: &mut ResolveContext<'_>,
    tag: &str,
    group: &[&OperationDescriptor],
    options: &DiscoveryOptions,
) -> Option<ResourceModel> {
    let mut claimed = vec![false; group.len()];
    let store = ctx.store();

    // Fixed priority; each operation satisfies at most one role.
    let create = claim(group, &mut claimed, |op| {
        op.method == Method::Post && !op.is_item_path()
    });
    let list = claim(group, &mut claimed, |op| {
        op.method == Method::Get
            && !op.is_item_path()
            && (!options.require_array_list_response || has_array_response(store, op))
    });
    let read = claim(group, &mut claimed, |op| {
        op.method == Method::Get && op.is_item_path()
    });
    let update = claim(group, &mut claimed, |op| {
        (op.method == Method::Put || op.method == Method::Patch) && op.is_item_path()
    });
    let delete = claim(group, &mut claimed, |op| {
        op.method == Method::Delete && op.is_item_path()
    });

    let actions: Vec<CustomAction> = group
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(op, _)| CustomAction {
            name: action_name(op),
            method: op.method.as_str().to_string(),
            path: op.path.clone(),
            level: if op.is_item_path() {
                ActionLevel::Item
            } else {
                ActionLevel::Collection
            },
        })
        .collect();

    // Viability: something to show or something to do.
    if list.is_none() && create.is_none() && read.is_none() && actions.is_empty() {
        return None;
    }

    let editable = create.is_some() || update.is_some();

    // Writable model: the create request schema, when reference-backed.
    // Inline create schemas are silently skipped - no reference, no form.
    let create_schema = create
        .and_then(|op| op.request_schema.as_ref())
        .and_then(schema_reference);
    let writable_model = create_schema
        .as_deref()
        .map(|name| strip_model_prefix(name).to_string());

    // Display model prefers the list response element, then the read response.
    let display_model = list
        .and_then(|op| op.success_response())
        .and_then(|schema| element_reference(schema))
        .or_else(|| {
            read.and_then(|op| op.success_response())
                .and_then(schema_reference)
        });

    // Form fields come from the create schema itself, not the stripped name.
    let form_properties = create_schema
        .as_deref()
        .map(|name| object_properties(ctx, name))
        .unwrap_or_default();

    let list_columns = display_model
        .as_deref()
        .map(|name| scalar_columns(ctx, name))
        .unwrap_or_default();

    Some(ResourceModel {
        names: ResourceNames::from_tag(tag),
        list: list.map(OperationRole::from_operation),
        create: create.map(OperationRole::from_operation),
        read: read.map(OperationRole::from_operation),
        update: update.map(OperationRole::from_operation),
        delete: delete.map(OperationRole::from_operation),
        actions,
        editable,
        writable_model,
        display_model,
        form_properties,
        list_columns,
    })
}

/// Claim the first unclaimed operation matching the predicate.
fn claim<'g>(
    group: &[&'g OperationDescriptor],
    claimed: &mut [bool],
    matches: impl Fn(&OperationDescriptor) -> bool,
) -> Option<&'g OperationDescriptor> {
    for (i, op) in group.iter().enumerate() {
        if !claimed[i] && matches(op) {
            claimed[i] = true;
            return Some(op);
        }
    }
    None
}

/// Label for a custom action: summary, then operation id, then the trailing
/// static path segment.
fn action_name(op: &OperationDescriptor) -> String {
    if let Some(summary) = op.summary.as_deref().filter(|s| !s.is_empty()) {
        return camel_case(summary);
    }
    if let Some(id) = op.operation_id.as_deref().filter(|s| !s.is_empty()) {
        return camel_case(id);
    }
    let segment = op
        .path
        .trim_end_matches('/')
        .rsplit('/')
        .find(|s| !s.is_empty() && !s.starts_with('{'))
        .unwrap_or("action");
    camel_case(segment)
}

fn has_array_response(store: &crate::store::SchemaStore, op: &OperationDescriptor) -> bool {
    let Some(schema) = op.success_response() else {
        return false;
    };
    match &schema.shape {
        Shape::Array { .. } => true,
        Shape::Reference(reference) => store
            .resolve_reference(reference)
            .is_some_and(|(_, node)| matches!(node.shape, Shape::Array { .. })),
        _ => false,
    }
}

/// Reference name of a schema, if it is (or wraps) a plain reference.
fn schema_reference(schema: &crate::schema::SchemaNode) -> Option<String> {
    match &schema.shape {
        Shape::Reference(reference) => reference_name(reference).map(String::from),
        _ => None,
    }
}

/// Element reference of an array response (`User[]` lists display `User`).
fn element_reference(schema: &crate::schema::SchemaNode) -> Option<String> {
    match &schema.shape {
        Shape::Array {
            items: crate::schema::Items::Single(element),
            ..
        } => schema_reference(element),
        Shape::Reference(_) => schema_reference(schema),
        _ => None,
    }
}

/// Ordered property descriptors of a named object schema.
fn object_properties(ctx: &mut ResolveContext<'_>, name: &str) -> Vec<PropertyDescriptor> {
    ctx.resolve_named(name);
    let Some(descriptor) = ctx.registered_type(name) else {
        return Vec::new();
    };
    match &ctx.dereference(descriptor).kind {
        TypeKind::Object(properties) => properties.clone(),
        _ => Vec::new(),
    }
}

/// Scalar, non-reference properties of the display schema become columns.
fn scalar_columns(ctx: &mut ResolveContext<'_>, name: &str) -> Vec<ListColumn> {
    object_properties(ctx, name)
        .iter()
        .filter(|prop| {
            matches!(
                prop.descriptor.kind,
                TypeKind::Boolean
                    | TypeKind::Integer
                    | TypeKind::Number
                    | TypeKind::String
                    | TypeKind::Date
                    | TypeKind::DateTime
                    | TypeKind::StringEnum(_)
                    | TypeKind::Enumeration { .. }
            )
        })
        .map(|prop| ListColumn {
            name: prop.name.clone(),
            label: title_case(&prop.name),
        })
        .collect()
}

/// Initial value for a property: schema default, then `null` for optional
/// fields, then a type-appropriate empty value for required ones.
pub fn initial_value(ctx: &ResolveContext<'_>, prop: &PropertyDescriptor) -> Value {
    if let Some(default) = &prop.descriptor.default {
        return default.clone();
    }
    if !prop.required {
        return Value::Null;
    }
    match &ctx.dereference(&prop.descriptor).kind {
        TypeKind::Boolean => Value::Bool(false),
        TypeKind::Integer | TypeKind::Number => Value::from(0),
        TypeKind::Array(_) | TypeKind::Tuple(_) => Value::Array(Vec::new()),
        _ => Value::String(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorOptions;
    use crate::operations::extract_operations;
    use crate::store::SchemaStore;
    use serde_json::json;

    fn discover(doc: Value, options: DiscoveryOptions) -> Vec<ResourceModel> {
        let store = SchemaStore::from_document(&doc).unwrap();
        let generator = GeneratorOptions::new();
        let mut ctx = ResolveContext::new(&store, &generator);
        let mut warnings = Vec::new();
        let operations = extract_operations(&doc, &mut warnings);
        discover_resources(&mut ctx, &operations, &options)
    }

    fn users_doc() -> Value {
        json!({
            "definitions": {
                "User": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "readOnly": true },
                        "name": { "type": "string" },
                        "address": { "$ref": "#/definitions/Address" }
                    }
                },
                "Address": { "type": "object", "properties": { "city": { "type": "string" } } },
                "CreateUser": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } },
                    "required": ["name"]
                }
            },
            "paths": {
                "/users": {
                    "get": {
                        "tags": ["users"],
                        "responses": { "200": { "schema": { "type": "array", "items": { "$ref": "#/definitions/User" } } } }
                    },
                    "post": {
                        "tags": ["users"],
                        "parameters": [{ "name": "body", "in": "body", "schema": { "$ref": "#/definitions/CreateUser" } }],
                        "responses": { "201": { "schema": { "$ref": "#/definitions/User" } } }
                    }
                },
                "/users/{id}": {
                    "get": {
                        "tags": ["users"],
                        "responses": { "200": { "schema": { "$ref": "#/definitions/User" } } }
                    },
                    "delete": { "tags": ["users"], "responses": { "204": {} } }
                }
            }
        })
    }

    #[test]
    fn discovers_crud_roles_without_update() {
        let resources = discover(users_doc(), DiscoveryOptions::default());
        assert_eq!(resources.len(), 1);

        let user = &resources[0];
        assert_eq!(user.names.singular, "user");
        assert_eq!(user.names.plural, "users");
        assert_eq!(user.names.title, "User");
        assert!(user.list.is_some());
        assert!(user.create.is_some());
        assert!(user.read.is_some());
        assert!(user.update.is_none());
        assert!(user.delete.is_some());
        assert!(user.editable, "create present implies editable");
        assert_eq!(user.delete.as_ref().unwrap().id_parameter.as_deref(), Some("id"));
    }

    #[test]
    fn writable_model_strips_create_prefix() {
        let resources = discover(users_doc(), DiscoveryOptions::default());
        assert_eq!(resources[0].writable_model.as_deref(), Some("User"));
        assert_eq!(resources[0].display_model.as_deref(), Some("User"));
        assert_eq!(resources[0].form_properties.len(), 1);
        assert_eq!(resources[0].form_properties[0].name, "name");
    }

    #[test]
    fn list_columns_exclude_references() {
        let resources = discover(users_doc(), DiscoveryOptions::default());
        let columns: Vec<&str> = resources[0]
            .list_columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(columns, vec!["id", "name"], "address reference excluded");
    }

    #[test]
    fn read_only_resource_is_retained_but_not_editable() {
        let doc = json!({
            "definitions": {
                "Tag": { "type": "object", "properties": { "label": { "type": "string" } } }
            },
            "paths": {
                "/tags": {
                    "get": { "tags": ["tags"], "responses": { "200": { "schema": { "type": "array", "items": { "$ref": "#/definitions/Tag" } } } } }
                },
                "/tags/{id}": {
                    "get": { "tags": ["tags"], "responses": { "200": { "schema": { "$ref": "#/definitions/Tag" } } } }
                }
            }
        });
        let resources = discover(doc, DiscoveryOptions::default());
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].names.singular, "tag");
        assert!(!resources[0].editable);
        assert!(resources[0].writable_model.is_none());
    }

    #[test]
    fn untagged_and_separator_tags_are_excluded() {
        let doc = json!({
            "paths": {
                "/a": { "get": { "responses": {} } },
                "/b": { "get": { "tags": ["admin/internal"], "responses": {} } }
            }
        });
        assert!(discover(doc, DiscoveryOptions::default()).is_empty());
    }

    #[test]
    fn roles_are_exclusive() {
        // A single GET on a collection path can satisfy list but must not
        // also be claimed as a custom action.
        let doc = json!({
            "paths": {
                "/things": {
                    "get": { "tags": ["things"], "responses": {} },
                    "post": { "tags": ["things"], "responses": {} }
                }
            }
        });
        let resources = discover(doc, DiscoveryOptions::default());
        assert_eq!(resources.len(), 1);
        assert!(resources[0].list.is_some());
        assert!(resources[0].create.is_some());
        assert!(resources[0].actions.is_empty());
    }

    #[test]
    fn array_list_requirement_demotes_non_array_get() {
        let doc = json!({
            "definitions": {
                "Stats": { "type": "object", "properties": { "count": { "type": "integer" } } }
            },
            "paths": {
                "/stats": {
                    "get": {
                        "tags": ["stats"],
                        "operationId": "getStats",
                        "responses": { "200": { "schema": { "$ref": "#/definitions/Stats" } } }
                    }
                }
            }
        });
        let resources = discover(
            doc,
            DiscoveryOptions {
                require_array_list_response: true,
            },
        );
        // The GET is not a list; it survives as a collection-level action.
        assert_eq!(resources.len(), 1);
        assert!(resources[0].list.is_none());
        assert_eq!(resources[0].actions.len(), 1);
        assert_eq!(resources[0].actions[0].name, "getStats");
        assert_eq!(resources[0].actions[0].level, ActionLevel::Collection);
    }

    #[test]
    fn unclaimed_operations_become_actions() {
        let doc = json!({
            "paths": {
                "/posts/{id}": {
                    "get": { "tags": ["posts"], "responses": {} }
                },
                "/posts/{id}/publish": {
                    "post": {
                        "tags": ["posts"],
                        "summary": "Publish a post",
                        "responses": {}
                    }
                }
            }
        });
        let resources = discover(doc, DiscoveryOptions::default());
        assert_eq!(resources.len(), 1);
        assert!(resources[0].read.is_some());
        assert_eq!(resources[0].actions.len(), 1);
        let action = &resources[0].actions[0];
        assert_eq!(action.name, "publishAPost");
        // Level follows the trailing-segment test: "publish" is static.
        assert_eq!(action.level, ActionLevel::Collection);
    }

    #[test]
    fn group_without_viable_shape_is_dropped() {
        let doc = json!({
            "paths": {
                "/queue/{id}": {
                    "delete": { "tags": ["queue"], "responses": {} }
                }
            }
        });
        // The delete claims its role, so there is no custom action left
        // and none of list/create/read is present.
        let resources = discover(doc, DiscoveryOptions::default());
        assert!(resources.is_empty());
    }

    #[test]
    fn inline_create_schema_yields_no_form() {
        let doc = json!({
            "paths": {
                "/notes": {
                    "post": {
                        "tags": ["notes"],
                        "parameters": [{
                            "name": "body", "in": "body",
                            "schema": { "type": "object", "properties": { "text": { "type": "string" } } }
                        }],
                        "responses": {}
                    }
                }
            }
        });
        let resources = discover(doc, DiscoveryOptions::default());
        assert_eq!(resources.len(), 1);
        assert!(resources[0].editable);
        assert!(resources[0].writable_model.is_none());
        assert!(resources[0].form_properties.is_empty());
    }
}
