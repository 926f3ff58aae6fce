//! Static type emission - renders descriptors as TypeScript declarations.
//!
//! Deterministic: identical input yields byte-identical output. Referenced
//! named types are generated lazily, depth-first, on first use; the emitted
//! set guards cycles. Presence (`?`) and nullability (`| null`) render as
//! independent markers.

use indexmap::{IndexMap, IndexSet};

use crate::error::ScaffoldError;
use crate::naming::{is_valid_identifier, sanitize_identifier, string_literal};
use crate::resolver::{EnumMember, PropertyDescriptor, ResolveContext, TypeDescriptor, TypeKind};

/// Emit declarations for the given root definitions and everything they
/// reference, each exactly once.
///
/// # Errors
///
/// Returns `ScaffoldError::DuplicateTypeName` when two distinct source
/// names sanitize to the same declaration name - silently dropping one
/// would leave dangling references in dependent artifacts.
pub fn emit_types(ctx: &mut ResolveContext<'_>, roots: &[&str]) -> Result<String, ScaffoldError> {
    for root in roots {
        ctx.resolve_named(root);
    }

    let mut state = EmitState::default();
    let mut out = String::new();
    for root in roots {
        emit_named(ctx, root, &mut state, &mut out)?;
    }
    Ok(out)
}

#[derive(Default)]
struct EmitState {
    emitted: IndexSet<String>,
    /// sanitized name -> source name, for duplicate detection.
    claimed: IndexMap<String, String>,
    /// enumeration name -> members, already declared.
    enums: IndexMap<String, Vec<EnumMember>>,
}

impl EmitState {
    fn claim(&mut self, sanitized: &str, source: &str) -> Result<(), ScaffoldError> {
        match self.claimed.get(sanitized) {
            Some(first) if first != source => Err(ScaffoldError::DuplicateTypeName {
                name: sanitized.to_string(),
                first: first.clone(),
                second: source.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.claimed
                    .insert(sanitized.to_string(), source.to_string());
                Ok(())
            }
        }
    }
}

fn emit_named(
    ctx: &ResolveContext<'_>,
    name: &str,
    state: &mut EmitState,
    out: &mut String,
) -> Result<(), ScaffoldError> {
    if !state.emitted.insert(name.to_string()) {
        return Ok(());
    }

    let Some(descriptor) = ctx.registered_type(name) else {
        // Unresolvable roots degraded to sentinels during resolution.
        return Ok(());
    };
    let descriptor = descriptor.clone();

    // Dependencies first, depth-first; the emitted set breaks cycles.
    for dependency in named_dependencies(&descriptor) {
        emit_named(ctx, &dependency, state, out)?;
    }

    // Inline enumerations hoist to their own declarations.
    for (enum_name, members) in enumerations(&descriptor) {
        emit_enum(&enum_name, &members, state, out)?;
    }

    let sanitized = sanitize_identifier(name);
    state.claim(&sanitized, name)?;

    match &descriptor.kind {
        TypeKind::Object(properties) => {
            if let Some(description) = &descriptor.description {
                out.push_str(&format!("/** {} */\n", description));
            }
            out.push_str(&format!("export interface {} {{\n", sanitized));
            for prop in properties {
                render_property(prop, out);
            }
            out.push_str("}\n\n");
        }
        TypeKind::Enumeration {
            name: enum_name, ..
        } => {
            // Declared by the hoisting pass; alias the definition name to it
            // when they differ.
            let enum_name = sanitize_identifier(enum_name);
            if enum_name != sanitized {
                out.push_str(&format!("export type {} = {};\n\n", sanitized, enum_name));
            }
        }
        other => {
            // Top-level nullability renders here; properties handle their own.
            let rendered = nullable_type(&TypeDescriptor {
                kind: other.clone(),
                ..descriptor.clone()
            });
            out.push_str(&format!("export type {} = {};\n\n", sanitized, rendered));
        }
    }
    Ok(())
}

fn emit_enum(
    name: &str,
    members: &[EnumMember],
    state: &mut EmitState,
    out: &mut String,
) -> Result<(), ScaffoldError> {
    let sanitized = sanitize_identifier(name);
    if let Some(existing) = state.enums.get(&sanitized) {
        if existing == members {
            return Ok(());
        }
        return Err(ScaffoldError::DuplicateTypeName {
            name: sanitized,
            first: "enumeration".to_string(),
            second: name.to_string(),
        });
    }
    state.claim(&sanitized, name)?;
    state.enums.insert(sanitized.clone(), members.to_vec());

    out.push_str(&format!("export enum {} {{\n", sanitized));
    for member in members {
        out.push_str(&format!("  {} = {},\n", member.name, member.value));
    }
    out.push_str("}\n\n");
    Ok(())
}

fn render_property(prop: &PropertyDescriptor, out: &mut String) {
    if let Some(description) = &prop.descriptor.description {
        out.push_str(&format!("  /** {} */\n", description));
    }
    let name = if is_valid_identifier(&prop.name) {
        prop.name.clone()
    } else {
        string_literal(&prop.name)
    };
    let read_only = if prop.read_only { "readonly " } else { "" };
    let optional = if prop.required { "" } else { "?" };
    let mut rendered = ts_type(&prop.descriptor);
    if prop.descriptor.nullable {
        rendered.push_str(" | null");
    }
    out.push_str(&format!(
        "  {}{}{}: {};\n",
        read_only, name, optional, rendered
    ));
}

/// Render a descriptor as an inline TypeScript type expression.
///
/// Nullability of the top-level descriptor is the caller's concern (it
/// renders differently for properties and aliases); nested nullability is
/// applied here.
pub fn ts_type(descriptor: &TypeDescriptor) -> String {
    match &descriptor.kind {
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::Integer | TypeKind::Number => "number".to_string(),
        TypeKind::String => "string".to_string(),
        TypeKind::Date | TypeKind::DateTime => "Date".to_string(),
        TypeKind::Binary => "Blob".to_string(),
        TypeKind::StringEnum(literals) => literals
            .iter()
            .map(|l| string_literal(l))
            .collect::<Vec<_>>()
            .join(" | "),
        TypeKind::Enumeration { name, .. } => sanitize_identifier(name),
        TypeKind::Array(element) => {
            let rendered = element_type(element);
            format!("{}[]", rendered)
        }
        TypeKind::Tuple(members) => {
            let rendered: Vec<String> = members.iter().map(nullable_type).collect();
            format!("[{}]", rendered.join(", "))
        }
        TypeKind::Map(value) => format!("Record<string, {}>", nullable_type(value)),
        TypeKind::ClosedObject => "Record<string, never>".to_string(),
        TypeKind::Object(properties) => {
            // Anonymous nested object literal.
            let rendered: Vec<String> = properties
                .iter()
                .map(|prop| {
                    let name = if is_valid_identifier(&prop.name) {
                        prop.name.clone()
                    } else {
                        string_literal(&prop.name)
                    };
                    let optional = if prop.required { "" } else { "?" };
                    format!("{}{}: {}", name, optional, nullable_type(&prop.descriptor))
                })
                .collect();
            format!("{{ {} }}", rendered.join("; "))
        }
        TypeKind::Union(members) => members
            .iter()
            .map(nullable_type)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeKind::Intersection(members) => members
            .iter()
            .map(element_type)
            .collect::<Vec<_>>()
            .join(" & "),
        TypeKind::Named(name) => sanitize_identifier(name),
        TypeKind::Any | TypeKind::Unknown => "unknown".to_string(),
    }
}

/// Inline type with nested nullability rendered.
fn nullable_type(descriptor: &TypeDescriptor) -> String {
    let rendered = ts_type(descriptor);
    if descriptor.nullable {
        format!("{} | null", rendered)
    } else {
        rendered
    }
}

/// Inline type parenthesized where operator precedence needs it.
fn element_type(descriptor: &TypeDescriptor) -> String {
    let rendered = nullable_type(descriptor);
    let compound = descriptor.nullable
        || matches!(
            descriptor.kind,
            TypeKind::Union(_) | TypeKind::Intersection(_) | TypeKind::StringEnum(_)
        );
    if compound {
        format!("({})", rendered)
    } else {
        rendered
    }
}

/// Named types referenced by a descriptor, in first-use order.
fn named_dependencies(descriptor: &TypeDescriptor) -> Vec<String> {
    let mut found = IndexSet::new();
    collect_named(descriptor, &mut found);
    found.into_iter().collect()
}

fn collect_named(descriptor: &TypeDescriptor, found: &mut IndexSet<String>) {
    match &descriptor.kind {
        TypeKind::Named(name) => {
            found.insert(name.clone());
        }
        TypeKind::Array(inner) | TypeKind::Map(inner) => collect_named(inner, found),
        TypeKind::Tuple(members)
        | TypeKind::Union(members)
        | TypeKind::Intersection(members) => {
            for member in members {
                collect_named(member, found);
            }
        }
        TypeKind::Object(properties) => {
            for prop in properties {
                collect_named(&prop.descriptor, found);
            }
        }
        _ => {}
    }
}

/// Inline enumerations within a descriptor, in first-use order.
fn enumerations(descriptor: &TypeDescriptor) -> Vec<(String, Vec<EnumMember>)> {
    let mut found = IndexMap::new();
    collect_enums(descriptor, &mut found);
    found.into_iter().collect()
}

fn collect_enums(descriptor: &TypeDescriptor, found: &mut IndexMap<String, Vec<EnumMember>>) {
    match &descriptor.kind {
        TypeKind::Enumeration { name, members } => {
            found.entry(name.clone()).or_insert_with(|| members.clone());
        }
        TypeKind::Array(inner) | TypeKind::Map(inner) => collect_enums(inner, found),
        TypeKind::Tuple(members)
        | TypeKind::Union(members)
        | TypeKind::Intersection(members) => {
            for member in members {
                collect_enums(member, found);
            }
        }
        TypeKind::Object(properties) => {
            for prop in properties {
                collect_enums(&prop.descriptor, found);
            }
        }
        _ => {}
    }
}
