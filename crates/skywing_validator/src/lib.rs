//! # Skywing Validator
//!
//! Validation engine for Skywing schemas. This crate provides:
//!
//! - the built-in rule set (`required`, `email`, `min`, `between`, `in`, `match`, `custom`, ...)
//! - the rule executor, which walks a compiled schema against a record
//! - the per-run error aggregator
//! - [`Validator`], which compiles and runs in one step
//!
//! ## Example
//!
//! ```rust
//! use skywing_core::{record_from, FieldSpecBuilder, SchemaBuilder};
//! use skywing_validator::Validator;
//!
//! let schema = SchemaBuilder::new()
//!     .field("color", "required|in:[red,green,blue]")
//!     .field(
//!         "nickname",
//!         FieldSpecBuilder::new("min:3").message("min", "too short"),
//!     )
//!     .build();
//!
//! let record = record_from([("color", "purple"), ("nickname", "Al")]);
//! let validator = Validator::new(&record, &schema).expect("schema compiles");
//!
//! if validator.pass() {
//!     println!("Validation passed!");
//! } else {
//!     for (field, messages) in validator.errors().iter() {
//!         println!("{field}: {messages:?}");
//!     }
//! }
//! # assert_eq!(validator.errors().get("nickname").unwrap(), ["too short"]);
//! ```

mod aggregator;
mod engine;
pub mod rules;

pub use aggregator::*;
pub use engine::*;
