//! Payload checking against named document schemas.

use serde_json::Value;

use crate::error::{CheckError, ScaffoldError, SchemaError};
use crate::store::SchemaStore;

/// Check a payload against one named schema from the store.
///
/// Builds a standalone schema document (so in-document references still
/// resolve) and collects every violation rather than stopping at the first.
///
/// # Errors
///
/// Returns `CheckError::Scaffold` if the name is unknown or the schema
/// cannot be compiled, or `CheckError::Invalid` with the full violation
/// list when the payload does not conform.
pub fn check_payload(store: &SchemaStore, name: &str, payload: &Value) -> Result<(), CheckError> {
    let schema = store.standalone_schema(name)?;
    check_against_schema(&schema, payload)
}

/// Check a payload against an already-assembled schema document.
pub fn check_against_schema(schema: &Value, payload: &Value) -> Result<(), CheckError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| {
        CheckError::Scaffold(ScaffoldError::InvalidDocument {
            message: e.to_string(),
        })
    })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(payload)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Invalid { errors })
    }
}
