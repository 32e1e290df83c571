//! `checkdef` - decode check definitions and print a projection.
//!
//! Reads a JSON document holding one check definition or an array of them,
//! from a file or stdin, and prints the chosen view as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;

use checkdef_core::decode::{decode_raw, RawDocument};
use checkdef_core::logging::structured::LogContext;
use checkdef_core::{decode_all, CheckDefinition};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum View {
    /// Canonical decoded record
    Record,
    /// Health-status view for the given node
    Health,
    /// Check-execution view
    Spec,
}

#[derive(Parser, Debug)]
#[command(
    name = "checkdef",
    version,
    about = "Decode check definitions and print a normalized view"
)]
struct Cli {
    /// JSON file to read; `-` or absent reads stdin
    file: Option<PathBuf>,

    #[arg(long, default_value = "local", help = "Node that owns the checks (health view)")]
    node: String,

    #[arg(long, value_enum, default_value = "record", help = "View to print")]
    view: View,
}

fn read_document(file: Option<&PathBuf>) -> Result<(String, String)> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(("stdin".to_string(), text))
        }
    }
}

fn render(definition: &CheckDefinition, view: View, node: &str) -> Result<Value> {
    let value = match view {
        View::Record => serde_json::to_value(definition)?,
        View::Health => serde_json::to_value(definition.health_check(node))?,
        View::Spec => {
            let spec = definition.check_type();
            let mut value = serde_json::to_value(&spec)?;
            if let (Some(kind), Some(obj)) = (spec.kind(), value.as_object_mut()) {
                obj.insert("Kind".to_string(), Value::String(kind.to_string()));
            }
            value
        }
    };
    Ok(value)
}

fn main() -> Result<()> {
    checkdef_core::init_logger();
    let cli = Cli::parse();

    let (source, text) = read_document(cli.file.as_ref())?;
    let ctx = LogContext::new(&source);

    let document: RawDocument =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", source))?;
    let definitions = match &document {
        RawDocument::Object(_) => decode_raw(&document, &ctx).map(|definition| vec![definition]),
        RawDocument::Other(value) => decode_all(value, &ctx),
    }
    .with_context(|| format!("failed to decode {}", source))?;

    if definitions.is_empty() {
        checkdef_core::log_warn!(ctx, "NO_DEFINITIONS", view = format!("{:?}", cli.view));
    }

    for definition in &definitions {
        let value = render(definition, cli.view, &cli.node)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    Ok(())
}
