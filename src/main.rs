//! cform - edit a JSON configuration document through a schema-driven form
//!
//! This is the binary entry point. All form logic lives in the workspace
//! crates.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde_json::Value;
use tracing::{debug, info, warn};

use cform_app::config;
use cform_app::state::{AppPhase, AppState};
use cform_app::{FormSession, KeyMap};
use cform_core::SchemaDocument;

/// cform - a terminal form for JSON schema configuration documents
#[derive(Parser, Debug)]
#[command(name = "cform")]
#[command(about = "Edit a JSON configuration document through a schema-driven form", long_about = None)]
struct Args {
    /// Schema document (`{ "definitions": {...}, "ps": [...] }`)
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Initial value tree (JSON object); defaults to `{}`
    #[arg(long, value_name = "FILE")]
    value: Option<PathBuf>,

    /// Write the submitted tree here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output only the top-level keys that changed
    #[arg(long)]
    diff: bool,

    /// Validate the schema, print its panels and field paths, and exit
    #[arg(long)]
    check: bool,

    /// Drop invalid fields and log schema issues instead of failing
    #[arg(long)]
    lenient: bool,

    /// Store a definition under another root path (NAME=PATH, repeatable)
    #[arg(long = "key", value_name = "NAME=PATH")]
    keys: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = cform_core::logging::init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    let schema = load_schema(&args.schema, args.lenient)?;
    let initial = match &args.value {
        Some(path) => load_value(path)?,
        None => Value::Object(Default::default()),
    };
    let keys = KeyMap::parse(args.keys.as_slice())?;

    let session = FormSession::new(schema, initial)?
        .with_key_map(keys)
        .on_value_change(|value| {
            let keys = value.as_object().map(|o| o.len()).unwrap_or(0);
            debug!("Form value changed ({keys} top-level keys)");
        });

    if args.check {
        print!("{}", outline(&session));
        return Ok(());
    }

    let settings = config::load_settings();
    let title = args
        .schema
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cform".to_string());

    let state = AppState::new(session, settings, title);
    let state = cform_tui::run(state).await?;

    match state.phase {
        AppPhase::Submitted => {
            let tree = if args.diff {
                state.session.diff()
            } else {
                state.session.into_value()
            };
            write_output(&tree, args.output.as_deref())?;
            info!("Form submitted");
        }
        phase => {
            info!("Form closed without submitting ({phase:?})");
            if state.session.is_modified() {
                eprintln!("Changes discarded.");
            }
        }
    }

    Ok(())
}

fn load_schema(path: &Path, lenient: bool) -> Result<SchemaDocument> {
    if !lenient {
        return SchemaDocument::from_path(path)
            .wrap_err_with(|| format!("Failed to load schema {}", path.display()));
    }

    let (doc, issues) = SchemaDocument::lenient_from_path(path)
        .wrap_err_with(|| format!("Failed to read schema {}", path.display()))?;
    for issue in &issues {
        warn!("Ignoring schema issue: {issue}");
    }
    if !issues.is_empty() {
        eprintln!(
            "Loaded {} with {} schema issue(s); see the log for details.",
            path.display(),
            issues.len()
        );
    }
    Ok(doc)
}

fn load_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read value file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Invalid JSON in {}", path.display()))?;
    if !value.is_object() {
        return Err(eyre!("{} must contain a JSON object", path.display()));
    }
    Ok(value)
}

fn write_output(tree: &Value, path: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(tree)?;
    json.push('\n');

    match path {
        Some(path) => std::fs::write(path, json)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(json.as_bytes())?,
    }
    Ok(())
}

/// Panels and field paths of a session, one line each
fn outline(session: &FormSession) -> String {
    let mut out = String::new();
    for panel in session.panels() {
        out.push_str(&format!("{} [{}]\n", panel.title, panel.key));
        for field in &panel.fields {
            out.push_str(&format!("  {}  ({})\n", field.path, field.schema.kind.type_name()));
        }
    }
    if !session.schema().ps().is_empty() {
        out.push_str(&format!("{} note(s)\n", session.schema().ps().len()));
    }
    out
}
