use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::commands::load_schema;
use crate::output;

pub fn execute(schema_path: &str, strict: bool, format: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let (schema, compiled) = load_schema(schema_path, strict)?;
    let unknown = compiled.unknown_rules();

    if format == "json" {
        let fields: Vec<_> = compiled
            .fields()
            .iter()
            .map(|field| {
                json!({
                    "name": field.name,
                    "rules": field.rules.iter().map(|rule| rule.name.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let output = json!({
            "valid": true,
            "fields": fields,
            "rule_count": compiled.rule_count(),
            "unknown_rules": unknown
                .iter()
                .map(|(field, rule)| json!({ "field": field, "rule": rule }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  Fields: {}", compiled.len());
    println!("  Rules:  {}", compiled.rule_count());

    println!("\nFields:");
    for (name, spec) in schema.iter() {
        println!("  {:<24} {}", name, spec.rules());
    }

    for (field, rule) in &unknown {
        output::print_warning(&format!(
            "Unknown rule '{}' on field '{}' will be skipped",
            rule, field
        ));
    }

    Ok(())
}
