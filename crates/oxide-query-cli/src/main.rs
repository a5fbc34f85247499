//! oxide-query CLI
//!
//! Command-line tool for inspecting the parameter bindings of a query.

use std::io::Read;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_query::{BindValue, DeclaredQuery, ParameterBinding, ParsedQuery, ToBindValue};

/// Inspect parameter bindings of object-query language strings.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format.
    #[arg(short, long, env = "OXIDE_QUERY_FORMAT", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cleaned query and its bindings.
    Parse {
        /// The query to parse (read from stdin if omitted).
        query: Option<String>,
    },

    /// Prepare runtime values for the bindings of a query.
    Prepare {
        /// The query to parse (read from stdin if omitted).
        query: Option<String>,

        /// A value as KEY=VALUE, where KEY is a parameter name or position
        /// and VALUE is JSON (plain text if it is not valid JSON).
        #[arg(long = "value", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
}

#[derive(Serialize)]
struct PreparedValue<'a> {
    binding: &'a ParameterBinding,
    value: BindValue,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn read_query(query: Option<String>) -> anyhow::Result<String> {
    match query {
        Some(query) => Ok(query),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read query from stdin")?;
            Ok(buffer.trim_end().to_string())
        }
    }
}

fn find_binding<'a>(parsed: &'a ParsedQuery, key: &str) -> Option<&'a ParameterBinding> {
    let key = key.trim_start_matches([':', '?']);
    match key.parse::<u32>() {
        Ok(position) => parsed.binding_at(position),
        Err(_) => parsed.binding_by_name(key),
    }
}

fn to_bind_value(raw: &str) -> BindValue {
    serde_json::from_str::<serde_json::Value>(raw)
        .map_or_else(|_| BindValue::from(raw), ToBindValue::to_bind_value)
}

fn print_bindings(parsed: &ParsedQuery) {
    println!("{}", parsed.cleaned_text());
    if !parsed.has_parameter_bindings() {
        println!("\nNo parameter bindings.");
        return;
    }
    println!("\nBindings:");
    println!("{:-<60}", "");
    for binding in parsed.bindings() {
        println!(" {binding}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse { query } => {
            let query = read_query(query)?;
            let parsed = ParsedQuery::new(&query)?;
            debug!(bindings = parsed.bindings().len(), "Parsed query");

            match cli.format {
                Format::Text => print_bindings(&parsed),
                Format::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
            }
        }

        Commands::Prepare { query, values } => {
            let query = read_query(query)?;
            let parsed = ParsedQuery::new(&query)?;

            let mut prepared = Vec::with_capacity(values.len());
            for (key, raw) in &values {
                let Some(binding) = find_binding(&parsed, key) else {
                    bail!("No parameter binding for `{key}` in: {}", parsed.cleaned_text());
                };
                let value = binding.prepare(to_bind_value(raw));
                debug!(binding = %binding, value = %value, "Prepared value");
                prepared.push(PreparedValue { binding, value });
            }

            match cli.format {
                Format::Text => {
                    for entry in &prepared {
                        println!("{} = {}", entry.binding, serde_json::to_string(&entry.value)?);
                    }
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&prepared)?),
            }
        }
    }

    Ok(())
}
