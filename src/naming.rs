//! Deterministic name transforms.
//!
//! Resource naming (singular/plural/title), identifier sanitization for
//! emitted declarations, and the conventional-prefix strip applied to
//! writable model names. All transforms are pure string functions so that
//! pluralize/singularize round-trip for regular names.

use heck::{ToLowerCamelCase, ToTitleCase, ToUpperCamelCase};

/// Pluralize a singular noun.
///
/// Sibilant endings (`s`, `x`, `z`, `ch`, `sh`) take `es`; a consonant
/// followed by `y` becomes `ies`; everything else takes `s`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if has_sibilant_ending(word) {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// Singularize a plural noun. Inverse of [`pluralize`] for regular names.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if has_sibilant_ending(stem) {
            return stem.to_string();
        }
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn has_sibilant_ending(word: &str) -> bool {
    word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Human-readable title form ("blogPost" -> "Blog Post").
pub fn title_case(word: &str) -> String {
    word.to_title_case()
}

/// Type-name form ("blog-post" -> "BlogPost").
pub fn pascal_case(word: &str) -> String {
    word.to_upper_camel_case()
}

/// Member/label form ("Blog Post" -> "blogPost").
pub fn camel_case(word: &str) -> String {
    word.to_lower_camel_case()
}

/// True when a name can be emitted as a bare identifier without quoting.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Force a name into bare-identifier form for generated declarations.
///
/// Non-identifier characters collapse into word boundaries; a leading digit
/// gets an underscore prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let pascal = cleaned.to_upper_camel_case();
    if pascal.is_empty() {
        return "_".to_string();
    }
    if pascal.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("_{}", pascal)
    } else {
        pascal
    }
}

/// Single-quoted literal for emitted code, with backslashes and quotes
/// escaped so embedded `'` cannot break the surrounding expression.
pub fn string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Strip the conventional `Create`/`New` prefix from a writable model name.
///
/// `CreateUserDto` and `NewUser` both describe a `User` payload; the
/// resource keeps the stripped form as its writable model name.
pub fn strip_model_prefix(name: &str) -> &str {
    for prefix in ["Create", "New"] {
        if let Some(stripped) = name.strip_prefix(prefix) {
            // Only strip at a camel-case word boundary.
            if stripped.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                return stripped;
            }
        }
    }
    name
}

/// Deterministic member name for one enum literal.
///
/// Strings pascal-case; numbers become `ValueN` with `Minus` for negatives
/// and the decimal point spelled as an underscore.
pub fn synthesize_member_name(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            let name = sanitize_identifier(s);
            if name == "_" {
                "Empty".to_string()
            } else {
                name
            }
        }
        serde_json::Value::Number(n) => {
            let rendered = n.to_string().replace('-', "Minus").replace('.', "_");
            format!("Value{}", rendered)
        }
        serde_json::Value::Bool(true) => "True".to_string(),
        serde_json::Value::Bool(false) => "False".to_string(),
        serde_json::Value::Null => "Null".to_string(),
        other => sanitize_identifier(&other.to_string()),
    }
}
