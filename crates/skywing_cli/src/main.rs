mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skywing")]
#[command(version, about = "Skywing declarative validation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate records against a schema
    Validate {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Path to the records file (one object or a list of objects)
        records: String,

        /// Reject schemas that reference unknown rules
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compile a schema without validating any data
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: String,

        /// Reject schemas that reference unknown rules
        #[arg(short, long)]
        strict: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            records,
            strict,
            format,
        } => commands::validate::execute(&schema, &records, strict, &format),

        Commands::Check {
            schema,
            strict,
            format,
        } => commands::check::execute(&schema, strict, &format),
    }
}
