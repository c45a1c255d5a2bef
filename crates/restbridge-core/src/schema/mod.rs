//! Schema handling between the tool catalog and the model
//!
//! - `translate`: catalog descriptors → model function declarations
//! - `validate_arguments`: model arguments checked against the declared schema

mod arguments;
mod translate;

pub use arguments::{validate_arguments, ArgumentError, ArgumentResult};
pub use translate::{translate, translate_all, STRIPPED_SCHEMA_KEYS};
