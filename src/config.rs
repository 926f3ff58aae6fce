//! Generator configuration.
//!
//! One [`GeneratorOptions`] value is threaded explicitly through every
//! resolver and emitter call; nothing is read from process-wide state.

use serde::{Deserialize, Serialize};

/// How `date` / `date-time` formatted strings are represented in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRepr {
    /// Keep the textual shape (ISO 8601 strings).
    #[default]
    String,
    /// Use a temporal shape (`Date` in emitted types, coercing validators).
    Temporal,
}

/// How members of a non-string enumeration are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumNaming {
    /// Synthesize a deterministic name from each literal value.
    #[default]
    Synthesized,
    /// Parse a structured `Name = value` list from the schema description,
    /// falling back to synthesized names when it does not parse.
    Description,
}

/// Target dialect for emitted runtime-check expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorDialect {
    #[default]
    Zod,
    Yup,
}

/// Control style for boolean properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanControl {
    #[default]
    Toggle,
    Checkbox,
}

/// Where a validated value arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Body,
    Response,
}

/// Per-location validator behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocationRules {
    /// Attempt text-to-typed coercion before validating. Needed for path,
    /// query, and header parameters, which arrive as text.
    pub coerce: bool,
    /// Reject unknown object keys.
    pub strict: bool,
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    pub date_repr: DateRepr,
    pub enum_naming: EnumNaming,
    pub dialect: ValidatorDialect,
    pub boolean_control: BooleanControl,
    pub path: LocationRules,
    pub query: LocationRules,
    pub header: LocationRules,
    pub body: LocationRules,
    pub response: LocationRules,
}

impl GeneratorOptions {
    /// Options with coercion on for textual locations and lax objects everywhere.
    pub fn new() -> Self {
        let coercing = LocationRules {
            coerce: true,
            strict: false,
        };
        GeneratorOptions {
            path: coercing,
            query: coercing,
            header: coercing,
            ..Default::default()
        }
    }

    /// Rules for a given request location.
    pub fn rules(&self, location: ParamLocation) -> LocationRules {
        match location {
            ParamLocation::Path => self.path,
            ParamLocation::Query => self.query,
            ParamLocation::Header => self.header,
            ParamLocation::Body => self.body,
            ParamLocation::Response => self.response,
        }
    }

    /// Set strict object checks for request bodies.
    pub fn strict_body(mut self, strict: bool) -> Self {
        self.body.strict = strict;
        self
    }

    pub fn date_repr(mut self, repr: DateRepr) -> Self {
        self.date_repr = repr;
        self
    }

    pub fn enum_naming(mut self, naming: EnumNaming) -> Self {
        self.enum_naming = naming;
        self
    }

    pub fn dialect(mut self, dialect: ValidatorDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn boolean_control(mut self, style: BooleanControl) -> Self {
        self.boolean_control = style;
        self
    }
}
