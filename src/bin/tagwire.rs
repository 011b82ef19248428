//! tagwire: the tagged wire codec CLI
//!
//! Encode values, decode wire pairs, inspect duration literals and decode
//! captured rows against a schema.
//!
//! # Usage
//!
//! ```bash
//! # Infer wire types
//! tagwire encode 42 3.5 '"hello"'
//!
//! # Decode a wire pair
//! tagwire decode Uint16 340282366920938463463374607431768211455
//!
//! # Decode captured rows
//! tagwire row --schema schema.json --row rows.json
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use tagwire::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagwire")]
#[command(version)]
#[command(about = "Tagged wire value codec", long_about = None)]
#[command(after_help = "EXAMPLES:
    tagwire encode 42 100000 3.5 '\"550e8400-e29b-41d4-a716-446655440000\"'
    tagwire encode --type Float4 3.14159265
    tagwire decode Interval P1Y2M3DT4H5M6.5S
    tagwire duration -- -P1DT2H
    tagwire row --schema schema.json --row row.json --format json")]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Config file (defaults to ./tagwire.toml, then the user config dir)
    #[arg(long, env = "TAGWIRE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode values into wire pairs
    Encode {
        /// Values as JSON literals; bare words are taken as strings
        #[arg(required = true)]
        values: Vec<String>,

        /// Parse every value as this wire type instead of inferring one
        #[arg(short = 't', long = "type")]
        ty: Option<WireType>,
    },
    /// Decode a single wire pair
    Decode {
        /// Wire type tag
        tag: String,
        /// Wire string
        value: String,
    },
    /// Parse a duration literal and show its components
    Duration {
        #[arg(allow_hyphen_values = true)]
        literal: String,
    },
    /// Decode captured rows against a schema
    Row {
        /// Schema as JSON
        #[arg(long)]
        schema: PathBuf,
        /// A row, or an array of rows, as JSON
        #[arg(long)]
        row: PathBuf,
    },
    /// Run a statement against a captured response
    Replay {
        statement: String,
        /// Response as JSON, `{"frames": [{"rows": [...]}]}`
        #[arg(long)]
        response: PathBuf,
        /// Schema as JSON
        #[arg(long)]
        schema: PathBuf,
        /// Positional parameters as JSON literals
        #[arg(short, long)]
        bind: Vec<String>,
    },
    /// List the wire type tags
    Types,
}

/// Answers every request with a response read from disk.
struct ReplayTransport {
    path: PathBuf,
}

impl Transport for ReplayTransport {
    async fn send(&self, request: Request) -> CodecResult<Response> {
        tracing::debug!("Replaying {} for {:?}", self.path.display(), request.statements);
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content)
            .map_err(|e| CodecError::Transport(format!("Invalid response file: {}", e)))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Encode { values, ty } => encode_values(values, *ty, cli.format),
        Commands::Decode { tag, value } => decode_pair(tag, value, cli.format),
        Commands::Duration { literal } => explain_duration(literal, cli.format),
        Commands::Row { schema, row } => {
            let config = load_config(cli.config.as_deref())?;
            decode_rows(schema, row, &config, cli.format)
        }
        Commands::Replay {
            statement,
            response,
            schema,
            bind,
        } => {
            let config = load_config(cli.config.as_deref())?;
            replay(statement, response, schema, bind, &config, cli.format).await
        }
        Commands::Types => {
            show_types();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CodecConfig> {
    let config = match path {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CodecConfig::discover()?,
    };
    Ok(config)
}

/// Read a CLI literal as JSON, falling back to a plain string.
fn literal_to_native(literal: &str) -> anyhow::Result<Native> {
    let json = serde_json::from_str(literal)
        .unwrap_or_else(|_| serde_json::Value::String(literal.to_string()));
    Ok(Native::from_json(json)?)
}

fn encode_values(values: &[String], ty: Option<WireType>, format: OutputFormat) -> anyhow::Result<()> {
    let mut pairs = Vec::with_capacity(values.len());
    for literal in values {
        let pair = match ty {
            Some(ty) => Value::parse(ty, literal)?.encode(),
            None => tagwire::encode(&literal_to_native(literal)?)?,
        };
        pairs.push((literal.as_str(), pair));
    }

    match format {
        OutputFormat::Json => {
            let out: Vec<&WirePair> = pairs.iter().map(|(_, pair)| pair).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = pairs
                .iter()
                .map(|(input, pair)| vec![input.to_string(), pair.ty.to_string(), pair.value.clone()])
                .collect();
            print_table(&["input", "type", "value"], &rows);
        }
    }
    Ok(())
}

fn decode_pair(tag: &str, value: &str, format: OutputFormat) -> anyhow::Result<()> {
    let native = tagwire::decode(tag, value)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&native)?),
        OutputFormat::Table => {
            println!("{} {}", "Kind:".dimmed(), native.kind().cyan());
            println!("{} {}", "Value:".dimmed(), native.to_string().white().bold());
        }
    }
    Ok(())
}

fn explain_duration(literal: &str, format: OutputFormat) -> anyhow::Result<()> {
    let interval = tagwire::parse_duration(literal)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&interval)?),
        OutputFormat::Table => {
            println!("{} {}", "Input:".dimmed(), literal.yellow());
            println!("{} {}", "Canonical:".dimmed(), interval.to_string().green().bold());
            println!("  {} {}", "months:".dimmed(), interval.months());
            println!("  {} {}", "days:".dimmed(), interval.days());
            println!("  {} {}", "nanos:".dimmed(), interval.nanoseconds());
            let sign = if interval.is_positive() {
                "positive"
            } else if interval.is_negative() {
                "negative"
            } else if interval.is_zero() {
                "zero"
            } else {
                "mixed"
            };
            println!("  {} {}", "sign:".dimmed(), sign.cyan());
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn decode_rows(
    schema_path: &Path,
    row_path: &Path,
    config: &CodecConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let schema: Schema = read_json(schema_path)?;
    let rows = match read_json::<WireData>(row_path)? {
        // A list of pairs is one positional row; a list of rows is a result set
        WireData::List(rows) if rows.iter().all(|r| !matches!(r, WireData::Pair { .. })) => rows,
        single => vec![single],
    };
    tracing::debug!("Decoding {} row(s) against {}", rows.len(), schema);

    let decoded = Decoder::new(config.decode).decode_rows(&schema, &rows)?;
    for (i, data) in decoded.iter().enumerate() {
        if !schema.validate(data) {
            tracing::warn!("Row {} does not match {}", i, schema);
        }
    }
    format_output(&decoded, format)
}

async fn replay(
    statement: &str,
    response: &Path,
    schema_path: &Path,
    bind: &[String],
    config: &CodecConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let schema: Schema = read_json(schema_path)?;
    let client = Client::with_config(
        ReplayTransport {
            path: response.to_path_buf(),
        },
        config,
    );

    let mut query = client.query(statement);
    for literal in bind {
        query = query.bind(literal_to_native(literal)?);
    }

    let request = query.request()?;
    tracing::info!("Request: {}", serde_json::to_string(&request)?);

    let rows = query.fetch_all(&schema).await?;
    format_output(&rows, format)
}

fn format_output(rows: &[Data], format: OutputFormat) -> anyhow::Result<()> {
    if rows.is_empty() {
        println!("{}", "(no rows)".dimmed());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => {
            let columns: Vec<&str> = match &rows[0] {
                Data::Object(fields) => fields.iter().map(|(name, _)| name.as_str()).collect(),
                _ => vec!["value"],
            };
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|row| match row {
                    Data::Object(fields) => fields.iter().map(|(_, d)| cell(d)).collect(),
                    other => vec![cell(other)],
                })
                .collect();
            print_table(&columns, &cells);
            println!();
            println!("{} row(s) decoded", rows.len().to_string().cyan());
        }
    }
    Ok(())
}

fn cell(data: &Data) -> String {
    match data {
        Data::Scalar(Native::Undefined) => ABSENT.to_string(),
        Data::Scalar(native) => native.to_string(),
        Data::Wrapped(value) => value.encode().to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn print_table(columns: &[&str], rows: &[Vec<String>]) {
    let mut widths: HashMap<usize, usize> = columns.iter().enumerate().map(|(i, c)| (i, c.chars().count())).collect();
    for row in rows {
        for (i, val) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(&i) {
                *w = (*w).max(val.chars().count());
            }
        }
    }

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:width$}", c, width = widths[&i]))
        .collect();
    println!("{}", header.join(" │ ").white().bold());

    let sep: Vec<String> = (0..columns.len()).map(|i| "─".repeat(widths[&i])).collect();
    println!("{}", sep.join("─┼─").dimmed());

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, val)| format!("{:width$}", val, width = widths.get(&i).copied().unwrap_or(0)))
            .collect();
        println!("{}", cells.join(" │ "));
    }
}

fn show_types() {
    println!("{}", "Wire Type Reference".cyan().bold());
    println!();

    let types = [
        (WireType::Boolean, "true / false", "Bool"),
        (WireType::Int1, "-128 ..= 127", "Int"),
        (WireType::Int2, "-32768 ..= 32767", "Int"),
        (WireType::Int4, "32-bit signed", "Int"),
        (WireType::Int8, "64-bit signed", "BigInt"),
        (WireType::Int16, "128-bit signed", "BigInt"),
        (WireType::Uint1, "0 ..= 255", "Int"),
        (WireType::Uint2, "0 ..= 65535", "Int"),
        (WireType::Uint4, "32-bit unsigned", "Int"),
        (WireType::Uint8, "64-bit unsigned", "BigUint"),
        (WireType::Uint16, "128-bit unsigned", "BigUint"),
        (WireType::Float4, "IEEE-754 binary32", "Float"),
        (WireType::Float8, "IEEE-754 binary64", "Float"),
        (WireType::Utf8, "UTF-8 text", "Str"),
        (WireType::Blob, "0x-prefixed hex", "Bytes"),
        (WireType::Date, "YYYY-MM-DD", "Date"),
        (WireType::DateTime, "RFC 3339, UTC", "DateTime"),
        (WireType::Time, "HH:MM:SS[.f]", "Time"),
        (WireType::Interval, "P[nY][nM][nD][T[nH][nM][nS]]", "Duration"),
        (WireType::Uuid4, "UUID version 4", "Uuid"),
        (WireType::Uuid7, "UUID version 7", "Uuid"),
        (WireType::IdentityId, "UUID version 7 or nil", "Uuid"),
        (WireType::RowNumber, "64-bit unsigned", "BigUint"),
        (WireType::Decimal, "decimal literal", "Str"),
        (WireType::Undefined, ABSENT, "Undefined"),
    ];

    println!(
        "{:12} {:32} {}",
        "Tag".white().bold(),
        "Wire form".white().bold(),
        "Native".white().bold()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (ty, form, native) in types {
        println!("{:12} {:32} {}", ty.as_str().cyan().bold(), form.yellow(), native.dimmed());
    }
}
