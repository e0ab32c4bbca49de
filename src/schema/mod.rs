//! JSON-schema validation of stored entity files

pub mod registry;
pub mod validator;

pub use registry::SchemaRegistry;
pub use validator::{SchemaValidator, ValidationReport};
