use anyhow::{Context, Result};
use skywing_core::RecordValidator;
use skywing_parser::parse_record_file;
use skywing_validator::RuleExecutor;
use std::path::Path;
use tracing::info;

use crate::commands::load_schema;
use crate::output;

pub fn execute(schema_path: &str, records_path: &str, strict: bool, format: &str) -> Result<()> {
    info!("Validating records: {}", records_path);
    info!("Schema: {}", schema_path);
    info!("Strict mode: {}", strict);

    let (_, compiled) = load_schema(schema_path, strict)?;

    let records = parse_record_file(Path::new(records_path))
        .with_context(|| format!("Failed to parse records file: {}", records_path))?;

    info!(
        "Loaded {} record(s) against {} field(s)",
        records.len(),
        compiled.len()
    );

    let reports = RuleExecutor::new().validate_all(&compiled, &records);

    output::print_validation_reports(&reports, format)?;

    if reports.iter().any(|report| !report.pass()) {
        std::process::exit(1);
    }

    Ok(())
}
