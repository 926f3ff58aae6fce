//! OpenAPI Scaffold
//!
//! Resolves OpenAPI / Swagger schema definitions into canonical type
//! descriptors and emits client-side artifacts from them: static type
//! declarations, runtime validator expressions, resource models recovered
//! from the operation list, and UI form control trees.
//!
//! # Example
//!
//! ```
//! use openapi_scaffold::{GeneratorOptions, ResolveContext, SchemaStore};
//! use openapi_scaffold::emit::types::emit_types;
//! use serde_json::json;
//!
//! let document = json!({
//!     "swagger": "2.0",
//!     "definitions": {
//!         "User": {
//!             "type": "object",
//!             "properties": {
//!                 "id": { "type": "string", "readOnly": true },
//!                 "name": { "type": "string" }
//!             },
//!             "required": ["name"]
//!         }
//!     }
//! });
//!
//! let store = SchemaStore::from_document(&document).unwrap();
//! let options = GeneratorOptions::new();
//! let mut ctx = ResolveContext::new(&store, &options);
//!
//! let declarations = emit_types(&mut ctx, &["User"]).unwrap();
//! assert!(declarations.contains("export interface User"));
//! assert!(declarations.contains("readonly id?: string;"));
//! assert!(declarations.contains("name: string;"));
//! ```
//!
//! # Pipeline
//!
//! 1. [`loader`] reads a document from a file, string, or URL.
//! 2. [`SchemaStore::from_document`] indexes the named schema definitions.
//! 3. [`SchemaNode::parse`](schema::SchemaNode::parse) gives every raw JSON
//!    schema a decided shape up front.
//! 4. [`ResolveContext`] resolves shapes into canonical [`TypeDescriptor`]s,
//!    deduplicating named types and absorbing recoverable problems as
//!    [`Warning`]s.
//! 5. The [`emit`] modules and [`discovery`] turn descriptors into artifacts.
//!
//! Everything is regenerated on each invocation; no state survives a run.

mod check;
mod config;
pub mod discovery;
pub mod emit;
mod error;
mod loader;
mod naming;
pub mod operations;
pub mod resolver;
pub mod schema;
mod store;

pub use check::{check_against_schema, check_payload};
pub use config::{
    BooleanControl, DateRepr, EnumNaming, GeneratorOptions, LocationRules, ParamLocation,
    ValidatorDialect,
};
pub use discovery::{discover_resources, DiscoveryOptions, ResourceModel};
pub use error::{
    CheckError, ScaffoldError, SchemaError, Warning, W_ENUM_DESCRIPTION, W_SKIPPED_OPERATION,
    W_UNRESOLVED_REF,
};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use operations::{extract_operations, OperationDescriptor, ParameterDescriptor};
pub use resolver::{PropertyDescriptor, ResolveContext, TypeDescriptor, TypeKind};
pub use schema::SchemaNode;
pub use store::{reference_name, SchemaSection, SchemaStore};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
