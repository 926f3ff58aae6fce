//! Target-specific emitters over canonical type descriptors.
//!
//! Each emitter is a pure function of the descriptor tree (plus the run
//! context for named-type lookup): static type declarations, runtime
//! validator expressions, and UI form control trees. They are independent
//! of each other and share no state beyond the resolver's registry.

pub mod forms;
pub mod types;
pub mod validators;
