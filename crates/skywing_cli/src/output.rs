use anyhow::Result;
use colored::*;
use serde_json::json;
use skywing_core::ValidationReport;

pub fn print_validation_reports(reports: &[ValidationReport], format: &str) -> Result<()> {
    match format {
        "json" => print_json_reports(reports),
        _ => {
            print_text_reports(reports);
            Ok(())
        }
    }
}

fn print_text_reports(reports: &[ValidationReport]) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    for (index, report) in reports.iter().enumerate() {
        if report.pass() {
            println!(
                "\n{} {}",
                "✓".green().bold(),
                format!("Record {} PASSED", index + 1).green().bold()
            );
            continue;
        }

        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("Record {} FAILED", index + 1).red().bold()
        );
        for (field, messages) in report.errors.iter() {
            println!("  {}:", field.bold());
            for message in messages {
                println!("    - {}", message.red());
            }
        }
    }

    let failed = reports.iter().filter(|report| !report.pass()).count();
    let messages: usize = reports
        .iter()
        .map(|report| report.errors.message_count())
        .sum();
    let skipped: usize = reports.iter().map(|report| report.stats.rules_skipped).sum();

    println!("\n{}", "Summary:".bold());
    println!("  Records checked: {}", reports.len());
    println!("  Records failed:  {}", failed);
    println!("  Total errors:    {}", messages);
    if skipped > 0 {
        println!("  Skipped rules:   {}", skipped.to_string().yellow());
    }
    println!("{}", "═".repeat(60));
}

fn print_json_reports(reports: &[ValidationReport]) -> Result<()> {
    let output: Vec<_> = reports
        .iter()
        .enumerate()
        .map(|(index, report)| {
            json!({
                "record": index,
                "pass": report.pass(),
                "errors": report.errors,
                "stats": report.stats,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message.yellow());
}
