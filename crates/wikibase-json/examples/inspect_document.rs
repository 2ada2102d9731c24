//! Decodes an entity JSON file and prints a readable summary.
//!
//! ```text
//! cargo run --example inspect_document -- Q42.json [site-iri]
//! ```
//!
//! Accepts either a bare entity document or a `Special:EntityData` response
//! (`{"entities": {"Q42": {...}}}`). Set `RUST_LOG=debug` to see decode
//! warnings.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use wikibase_json::{DecodeContext, decode_document, render_document};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: inspect_document <file.json> [site-iri]");
        return ExitCode::FAILURE;
    };
    let ctx = args.next().map(DecodeContext::new).unwrap_or_default();

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("cannot read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };
    let json: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("{} is not JSON: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    // Unwrap an EntityData envelope holding a single entity
    let entity = match json.get("entities").and_then(|e| e.as_object()) {
        Some(entities) if entities.len() == 1 => entities.values().next().unwrap_or(&json),
        _ => &json,
    };

    match decode_document(entity, &ctx) {
        Ok(doc) => {
            print!("{}", render_document(&doc));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot decode {}: {}", path, err);
            ExitCode::FAILURE
        }
    }
}
