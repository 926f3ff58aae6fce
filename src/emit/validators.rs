//! Validator emission - renders descriptors as composable runtime-check
//! expressions in a configurable dialect (zod or yup).
//!
//! Two per-location axes apply: coercion (text-to-typed conversion for
//! path/query/header values, which arrive as text) and strictness (objects
//! reject unknown keys). Write-direction validators exclude `readOnly`
//! properties; read-direction validators include them.

use crate::config::{LocationRules, ParamLocation, ValidatorDialect};
use crate::error::ScaffoldError;
use crate::naming::{camel_case, sanitize_identifier, string_literal};
use crate::operations::OperationDescriptor;
use crate::resolver::{Constraints, ResolveContext, TypeDescriptor, TypeKind};

/// Which side of the wire the validated value travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitDirection {
    /// Request bodies and parameters: `readOnly` properties excluded.
    Write,
    /// Responses and read projections: `readOnly` properties included.
    Read,
}

impl EmitDirection {
    /// Direction implied by a request location.
    pub fn for_location(location: ParamLocation) -> EmitDirection {
        match location {
            ParamLocation::Response => EmitDirection::Read,
            _ => EmitDirection::Write,
        }
    }
}

/// Emit one named validator constant per root definition and everything it
/// references. References render as lazy lookups, so cycles are safe.
pub fn emit_validators(
    ctx: &mut ResolveContext<'_>,
    roots: &[&str],
    location: ParamLocation,
) -> Result<String, ScaffoldError> {
    for root in roots {
        ctx.resolve_named(root);
    }
    let direction = EmitDirection::for_location(location);
    let rules = ctx.options().rules(location);
    let dialect = ctx.options().dialect;

    let mut out = String::new();
    // Registration order is first-use order, so dependencies come first;
    // lazy references cover the cyclic remainder.
    let registered: Vec<(String, TypeDescriptor)> = ctx
        .registered()
        .map(|(name, descriptor)| (name.to_string(), descriptor.clone()))
        .collect();
    for (name, descriptor) in registered {
        let expression = validator_expression(ctx, &descriptor, dialect, rules, direction);
        out.push_str(&format!(
            "export const {} = {};\n\n",
            schema_const(&name),
            expression
        ));
    }
    Ok(out)
}

/// Name of the emitted validator constant for a named type.
pub fn schema_const(name: &str) -> String {
    format!("{}Schema", sanitize_identifier(name))
}

/// Emit validator constants for one operation: an object per non-empty
/// parameter group (path/query/header, each with that location's coercion
/// and strictness rules), plus body and success-response constants when
/// those schemas are declared.
///
/// Named references render as lazy lookups against the constants produced
/// by [`emit_validators`]; emit those roots alongside when the operation's
/// schemas reference named definitions.
pub fn emit_operation_validators(
    ctx: &mut ResolveContext<'_>,
    op: &OperationDescriptor,
) -> Result<String, ScaffoldError> {
    let dialect = ctx.options().dialect;
    let ident = operation_ident(op);
    let mut out = String::new();

    let resolved: Vec<(ParamLocation, String, bool, TypeDescriptor)> = op
        .parameters
        .iter()
        .map(|param| {
            let descriptor = ctx.resolve(
                &param.schema,
                &format!("/paths{}/{}/parameters/{}", op.path, op.method, param.name),
            );
            (param.location, param.name.clone(), param.required, descriptor)
        })
        .collect();

    for (location, suffix) in [
        (ParamLocation::Path, "PathParams"),
        (ParamLocation::Query, "QueryParams"),
        (ParamLocation::Header, "HeaderParams"),
    ] {
        let rules = ctx.options().rules(location);
        let mut entries = Vec::new();
        for (at, name, required, descriptor) in &resolved {
            if *at != location {
                continue;
            }
            let mut expression =
                validator_expression(ctx, descriptor, dialect, rules, EmitDirection::Write);
            if !*required && descriptor.default.is_none() {
                expression = match dialect {
                    ValidatorDialect::Zod => format!("{}.optional()", expression),
                    ValidatorDialect::Yup => format!("{}.notRequired()", expression),
                };
            } else if *required && dialect == ValidatorDialect::Yup {
                expression = format!("{}.required()", expression);
            }
            entries.push(format!("{}: {}", key_literal(name), expression));
        }
        if entries.is_empty() {
            continue;
        }
        let body = entries.join(", ");
        let object = match (dialect, rules.strict) {
            (ValidatorDialect::Zod, true) => format!("z.object({{ {} }}).strict()", body),
            (ValidatorDialect::Zod, false) => format!("z.object({{ {} }})", body),
            (ValidatorDialect::Yup, true) => format!("yup.object({{ {} }}).noUnknown()", body),
            (ValidatorDialect::Yup, false) => format!("yup.object({{ {} }})", body),
        };
        out.push_str(&format!(
            "export const {}{}Schema = {};\n\n",
            ident, suffix, object
        ));
    }

    if let Some(schema) = &op.request_schema {
        let descriptor = ctx.resolve(
            schema,
            &format!("/paths{}/{}/requestBody", op.path, op.method),
        );
        let rules = ctx.options().rules(ParamLocation::Body);
        let expression =
            validator_expression(ctx, &descriptor, dialect, rules, EmitDirection::Write);
        out.push_str(&format!(
            "export const {}BodySchema = {};\n\n",
            ident, expression
        ));
    }

    if let Some(schema) = op.success_response() {
        let descriptor = ctx.resolve(
            schema,
            &format!("/paths{}/{}/responses", op.path, op.method),
        );
        let rules = ctx.options().rules(ParamLocation::Response);
        let expression =
            validator_expression(ctx, &descriptor, dialect, rules, EmitDirection::Read);
        out.push_str(&format!(
            "export const {}ResponseSchema = {};\n\n",
            ident, expression
        ));
    }

    Ok(out)
}

/// Constant-name stem for one operation: the operation id when present,
/// otherwise the method plus the path's segments.
fn operation_ident(op: &OperationDescriptor) -> String {
    if let Some(id) = op.operation_id.as_deref().filter(|s| !s.is_empty()) {
        return camel_case(id);
    }
    let segments: Vec<&str> = op
        .path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_matches(|c| c == '{' || c == '}'))
        .collect();
    camel_case(&format!("{} {}", op.method.as_str(), segments.join(" ")))
}

/// Render one descriptor as a validator expression.
///
/// Pure over the descriptor: the only context use is named-type lookup for
/// the lazy-reference form.
pub fn validator_expression(
    ctx: &ResolveContext<'_>,
    descriptor: &TypeDescriptor,
    dialect: ValidatorDialect,
    rules: LocationRules,
    direction: EmitDirection,
) -> String {
    let base = base_expression(ctx, descriptor, dialect, rules, direction);
    wrap_modifiers(base, descriptor)
}

fn base_expression(
    ctx: &ResolveContext<'_>,
    descriptor: &TypeDescriptor,
    dialect: ValidatorDialect,
    rules: LocationRules,
    direction: EmitDirection,
) -> String {
    use ValidatorDialect::{Yup, Zod};
    match &descriptor.kind {
        TypeKind::Boolean => match (dialect, rules.coerce) {
            (Zod, true) => "z.coerce.boolean()".to_string(),
            (Zod, false) => "z.boolean()".to_string(),
            // yup coerces by default.
            (Yup, _) => "yup.boolean()".to_string(),
        },
        TypeKind::Integer => {
            let base = match (dialect, rules.coerce) {
                (Zod, true) => "z.coerce.number().int()".to_string(),
                (Zod, false) => "z.number().int()".to_string(),
                (Yup, _) => "yup.number().integer()".to_string(),
            };
            number_checks(base, &descriptor.constraints, dialect)
        }
        TypeKind::Number => {
            let base = match (dialect, rules.coerce) {
                (Zod, true) => "z.coerce.number()".to_string(),
                (Zod, false) => "z.number()".to_string(),
                (Yup, _) => "yup.number()".to_string(),
            };
            number_checks(base, &descriptor.constraints, dialect)
        }
        TypeKind::String => {
            let base = match dialect {
                Zod => "z.string()".to_string(),
                Yup => "yup.string()".to_string(),
            };
            string_checks(base, &descriptor.constraints, dialect)
        }
        TypeKind::Date | TypeKind::DateTime => match (dialect, rules.coerce) {
            (Zod, true) => "z.coerce.date()".to_string(),
            (Zod, false) => "z.date()".to_string(),
            (Yup, _) => "yup.date()".to_string(),
        },
        TypeKind::Binary => match dialect {
            Zod => "z.instanceof(Blob)".to_string(),
            Yup => "yup.mixed()".to_string(),
        },
        TypeKind::StringEnum(literals) => enum_check(literals, dialect),
        TypeKind::Enumeration { members, .. } => {
            let values: Vec<String> = members.iter().map(|m| m.value.to_string()).collect();
            literal_choice(&values, dialect)
        }
        TypeKind::Array(element) => {
            let inner = validator_expression(ctx, element, dialect, rules, direction);
            let base = match dialect {
                Zod => format!("z.array({})", inner),
                Yup => format!("yup.array().of({})", inner),
            };
            array_checks(base, &descriptor.constraints, dialect)
        }
        TypeKind::Tuple(members) => {
            let inner: Vec<String> = members
                .iter()
                .map(|m| validator_expression(ctx, m, dialect, rules, direction))
                .collect();
            match dialect {
                Zod => format!("z.tuple([{}])", inner.join(", ")),
                // yup has no tuple; a fixed-length array is the closest check.
                Yup => format!("yup.array().length({})", members.len()),
            }
        }
        TypeKind::Map(value) => {
            let inner = validator_expression(ctx, value, dialect, rules, direction);
            match dialect {
                Zod => format!("z.record(z.string(), {})", inner),
                Yup => "yup.object()".to_string(),
            }
        }
        TypeKind::ClosedObject => match dialect {
            Zod => "z.object({}).strict()".to_string(),
            Yup => "yup.object({}).noUnknown()".to_string(),
        },
        TypeKind::Object(properties) => {
            object_check(ctx, properties, dialect, rules, direction)
        }
        TypeKind::Union(members) => {
            let inner: Vec<String> = members
                .iter()
                .map(|m| validator_expression(ctx, m, dialect, rules, direction))
                .collect();
            match dialect {
                Zod => format!("z.union([{}])", inner.join(", ")),
                // yup has no union combinator.
                Yup => "yup.mixed()".to_string(),
            }
        }
        TypeKind::Intersection(members) => {
            let inner: Vec<String> = members
                .iter()
                .map(|m| validator_expression(ctx, m, dialect, rules, direction))
                .collect();
            let Some((first, rest)) = inner.split_first() else {
                return match dialect {
                    Zod => "z.unknown()".to_string(),
                    Yup => "yup.mixed()".to_string(),
                };
            };
            let mut chain = first.clone();
            for member in rest {
                chain = match dialect {
                    Zod => format!("{}.and({})", chain, member),
                    Yup => format!("{}.concat({})", chain, member),
                };
            }
            chain
        }
        TypeKind::Named(name) => match dialect {
            Zod => format!("z.lazy(() => {})", schema_const(name)),
            Yup => format!("yup.lazy(() => {})", schema_const(name)),
        },
        TypeKind::Any | TypeKind::Unknown => match dialect {
            Zod => "z.unknown()".to_string(),
            Yup => "yup.mixed()".to_string(),
        },
    }
}

fn object_check(
    ctx: &ResolveContext<'_>,
    properties: &[crate::resolver::PropertyDescriptor],
    dialect: ValidatorDialect,
    rules: LocationRules,
    direction: EmitDirection,
) -> String {
    let entries: Vec<String> = properties
        .iter()
        .filter(|prop| direction == EmitDirection::Read || !prop.read_only)
        .map(|prop| {
            let mut expression =
                validator_expression(ctx, &prop.descriptor, dialect, rules, direction);
            if !prop.required && prop.descriptor.default.is_none() {
                expression = match dialect {
                    ValidatorDialect::Zod => format!("{}.optional()", expression),
                    ValidatorDialect::Yup => format!("{}.notRequired()", expression),
                };
            } else if prop.required && dialect == ValidatorDialect::Yup {
                expression = format!("{}.required()", expression);
            }
            format!("{}: {}", key_literal(&prop.name), expression)
        })
        .collect();

    let body = entries.join(", ");
    match (dialect, rules.strict) {
        (ValidatorDialect::Zod, true) => format!("z.object({{ {} }}).strict()", body),
        (ValidatorDialect::Zod, false) => format!("z.object({{ {} }})", body),
        (ValidatorDialect::Yup, true) => format!("yup.object({{ {} }}).noUnknown()", body),
        (ValidatorDialect::Yup, false) => format!("yup.object({{ {} }})", body),
    }
}

/// A present default takes precedence over nullable/optional wrapping.
fn wrap_modifiers(mut expression: String, descriptor: &TypeDescriptor) -> String {
    if let Some(default) = &descriptor.default {
        return format!("{}.default({})", expression, default);
    }
    if descriptor.nullable {
        expression = format!("{}.nullable()", expression);
    }
    expression
}

fn number_checks(mut base: String, constraints: &Constraints, dialect: ValidatorDialect) -> String {
    use ValidatorDialect::{Yup, Zod};
    let number = &constraints.number;
    if let Some(minimum) = number.minimum {
        base = match (dialect, number.exclusive_minimum) {
            (Zod, false) => format!("{}.min({})", base, render_f64(minimum)),
            (Zod, true) => format!("{}.gt({})", base, render_f64(minimum)),
            (Yup, false) => format!("{}.min({})", base, render_f64(minimum)),
            (Yup, true) => format!("{}.moreThan({})", base, render_f64(minimum)),
        };
    }
    if let Some(maximum) = number.maximum {
        base = match (dialect, number.exclusive_maximum) {
            (Zod, false) => format!("{}.max({})", base, render_f64(maximum)),
            (Zod, true) => format!("{}.lt({})", base, render_f64(maximum)),
            (Yup, false) => format!("{}.max({})", base, render_f64(maximum)),
            (Yup, true) => format!("{}.lessThan({})", base, render_f64(maximum)),
        };
    }
    if let Some(multiple) = number.multiple_of {
        base = match dialect {
            Zod => format!("{}.multipleOf({})", base, render_f64(multiple)),
            Yup => format!(
                "{}.test('multiple-of', 'must be a multiple of {m}', (v) => v == null || v % {m} === 0)",
                base,
                m = render_f64(multiple)
            ),
        };
    }
    base
}

fn string_checks(mut base: String, constraints: &Constraints, dialect: ValidatorDialect) -> String {
    let string = &constraints.string;
    if let Some(min) = string.min_length {
        base = format!("{}.min({})", base, min);
    }
    if let Some(max) = string.max_length {
        base = format!("{}.max({})", base, max);
    }
    if let Some(pattern) = &string.pattern {
        base = match dialect {
            ValidatorDialect::Zod => format!("{}.regex(/{}/)", base, escape_regex(pattern)),
            ValidatorDialect::Yup => format!("{}.matches(/{}/)", base, escape_regex(pattern)),
        };
    }
    base
}

fn array_checks(mut base: String, constraints: &Constraints, dialect: ValidatorDialect) -> String {
    let array = &constraints.array;
    if let Some(min) = array.min_items {
        base = format!("{}.min({})", base, min);
    }
    if let Some(max) = array.max_items {
        base = format!("{}.max({})", base, max);
    }
    if array.unique_items {
        base = match dialect {
            ValidatorDialect::Zod => format!(
                "{}.refine((items) => new Set(items).size === items.length)",
                base
            ),
            ValidatorDialect::Yup => format!(
                "{}.test('unique', 'items must be unique', (v) => v == null || new Set(v).size === v.length)",
                base
            ),
        };
    }
    base
}

/// A single-value enum is a literal check; longer enumerations become a
/// closed-choice check.
fn enum_check(literals: &[String], dialect: ValidatorDialect) -> String {
    let quoted: Vec<String> = literals.iter().map(|l| string_literal(l)).collect();
    if quoted.len() == 1 {
        return match dialect {
            ValidatorDialect::Zod => format!("z.literal({})", quoted[0]),
            ValidatorDialect::Yup => format!("yup.mixed().oneOf([{}])", quoted[0]),
        };
    }
    match dialect {
        ValidatorDialect::Zod => format!("z.enum([{}])", quoted.join(", ")),
        ValidatorDialect::Yup => format!("yup.string().oneOf([{}])", quoted.join(", ")),
    }
}

fn literal_choice(values: &[String], dialect: ValidatorDialect) -> String {
    if values.len() == 1 {
        return match dialect {
            ValidatorDialect::Zod => format!("z.literal({})", values[0]),
            ValidatorDialect::Yup => format!("yup.mixed().oneOf([{}])", values[0]),
        };
    }
    match dialect {
        ValidatorDialect::Zod => {
            let literals: Vec<String> =
                values.iter().map(|v| format!("z.literal({})", v)).collect();
            format!("z.union([{}])", literals.join(", "))
        }
        ValidatorDialect::Yup => format!("yup.mixed().oneOf([{}])", values.join(", ")),
    }
}

fn key_literal(name: &str) -> String {
    if crate::naming::is_valid_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn escape_regex(pattern: &str) -> String {
    pattern.replace('/', "\\/")
}

fn render_f64(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
