//! jsonapi-normalize: Flatten JSON:API documents into a type/id store
//!
//! Usage:
//!   # Read from file, output to stdout
//!   jsonapi-normalize response.json --endpoint /articles?include=author
//!
//!   # Read from stdin, output to stdout
//!   curl -s https://example.com/articles | jsonapi-normalize --endpoint /articles
//!
//!   # One document per line, compact output
//!   jsonapi-normalize --ndjson responses.jsonl
//!
//!   # Load options from a JSON file, overriding some of them
//!   jsonapi-normalize --config options.json --no-camelize-keys response.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use jsonapi_normalize::{normalize_json, NormalizeOptions, Normalizer};
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonapi-normalize")]
#[command(
    about = "Flatten JSON:API documents into a store keyed by type and id",
    long_about = None
)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one document per line)
    #[arg(long)]
    ndjson: bool,

    /// Endpoint the document came from; enables the `meta` section
    #[arg(long, short = 'e')]
    endpoint: Option<String>,

    /// Key `meta` by the raw endpoint instead of base path and query
    #[arg(long)]
    no_filter_endpoint: bool,

    /// Keep attribute, link and meta keys as they appear in the document
    #[arg(long)]
    no_camelize_keys: bool,

    /// Keep `type` values as they appear in the document
    #[arg(long)]
    no_camelize_type_values: bool,

    /// JSON file with base options
    /// (`endpoint`, `filterEndpoint`, `camelizeKeys`, `camelizeTypeValues`)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let options = build_options(&args)?;

    let reader: Box<dyn BufRead> = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let mut out = stdout().lock();

    if args.ndjson {
        let count = normalize_json(reader, &mut out, options)?;
        if count == 0 {
            tracing::warn!("no JSON:API documents found in input");
        }
    } else {
        let value = read_document(reader)?;
        let normalized = Normalizer::new(options).normalize(&value)?;

        let output = if args.compact {
            serde_json::to_string(&normalized)?
        } else {
            serde_json::to_string_pretty(&normalized)?
        };
        writeln!(out, "{}", output)?;
    }

    out.flush()?;
    Ok(())
}

/// Start from the config file (or defaults) and apply command-line overrides
fn build_options(args: &Args) -> Result<NormalizeOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse options from {}", path))?
        }
        None => NormalizeOptions::default(),
    };

    if let Some(endpoint) = &args.endpoint {
        options.endpoint = Some(endpoint.clone());
    }
    if args.no_filter_endpoint {
        options.filter_endpoint = false;
    }
    if args.no_camelize_keys {
        options.camelize_keys = false;
    }
    if args.no_camelize_type_values {
        options.camelize_type_values = false;
    }

    tracing::debug!(?options, "resolved options");
    Ok(options)
}

/// Read a whole document, using SIMD parsing when the input allows it
fn read_document(mut reader: Box<dyn BufRead>) -> Result<Value> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    // simd-json parses in place, so keep a copy for the fallback path
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::debug!(%err, "simd-json parse failed, falling back to serde_json");
            serde_json::from_slice(&content).context("Failed to parse JSON")
        }
    }
}
