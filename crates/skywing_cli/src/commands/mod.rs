pub mod check;
pub mod validate;

use anyhow::{Context, Result};
use skywing_core::{CompileOptions, CompiledSchema, Schema};
use skywing_parser::parse_file;
use std::path::Path;

/// Loads and compiles a schema file.
pub fn load_schema(schema_path: &str, strict: bool) -> Result<(Schema, CompiledSchema)> {
    let schema = parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    let options = CompileOptions::new().with_strict(strict);
    let compiled = CompiledSchema::compile_with(&schema, &options)
        .with_context(|| format!("Failed to compile schema: {}", schema_path))?;

    Ok((schema, compiled))
}
