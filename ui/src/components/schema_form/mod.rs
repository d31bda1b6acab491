//! Schema-Driven Document Forms
//!
//! Derives a field model from a Mongoose-style schema and renders an editable
//! form for a document:
//! - Scalars, nested objects, arrays and references to other collections
//! - Optional fields picked from a checklist, required ones always shown
//! - A raw JSON view of the document being edited

pub mod types;
pub mod model;
pub mod defaults;
pub mod path;
pub mod active;
pub mod generator;
pub mod fields;
pub mod array_field;
pub mod reference_field;

pub use types::*;
pub use generator::*;
