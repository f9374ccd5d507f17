//! # Skywing Core
//!
//! Core data structures for the Skywing validation engine.
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace: the values a record carries, the schema that describes how each
//! field is validated, the compiler that turns rule strings into structured
//! rule invocations, and the report a validation run produces.
//!
//! ## Key Concepts
//!
//! - **Record**: field name to [`DataValue`], the data being validated
//! - **Schema**: field name to rule string (or structured [`FieldSpec`]), in declaration order
//! - **Rule string**: `required|min:3|in:[a,b]`, compiled once into a [`CompiledSchema`]
//! - **Report**: per-field error messages plus run statistics
//!
//! ## Example
//!
//! ```rust
//! use skywing_core::{RuleKind, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field("username", "required|alphanum|between:[3,16]")
//!     .field("email", "required|email")
//!     .build();
//!
//! let compiled = schema.compile().expect("schema should compile");
//! let username = compiled.field("username").unwrap();
//! assert_eq!(username.rules[2].kind, Some(RuleKind::Between));
//! assert_eq!(username.rules[2].parameter.as_range(), Some((3, 16)));
//! ```

pub mod builder;
pub mod coerce;
pub mod compiler;
pub mod error;
pub mod rule;
pub mod schema;
pub mod validator;
pub mod value;

pub use builder::*;
pub use compiler::*;
pub use error::*;
pub use rule::*;
pub use schema::*;
pub use validator::*;
pub use value::*;
