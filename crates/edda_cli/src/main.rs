//! CLI entry point for quick document inspection.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `edda_core` linkage.
//! - Expose non-interactive counterparts of the editor's open/find flows.

use edda_core::{DocumentStore, DocxStore, FindQuery};
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "usage:
  edda version
  edda dump <file.docx> [--tagged]
  edda find <file.docx> <query>";

fn main() -> ExitCode {
    init_logging_best_effort();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("edda: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    match args.first().map(String::as_str) {
        Some("version") => {
            println!("edda_core version={}", edda_core::core_version());
            Ok(())
        }
        Some("dump") => {
            let path = args.get(1).ok_or(USAGE)?;
            let tagged = match args.get(2).map(String::as_str) {
                None => false,
                Some("--tagged") => true,
                Some(other) => return Err(format!("unknown option `{other}`\n{USAGE}")),
            };
            let document = DocxStore::new()
                .load(Path::new(path))
                .map_err(|err| err.to_string())?;
            println!("{}", document.text(tagged));
            Ok(())
        }
        Some("find") => {
            let path = args.get(1).ok_or(USAGE)?;
            let query = args.get(2).ok_or(USAGE)?;
            let document = DocxStore::new()
                .load(Path::new(path))
                .map_err(|err| err.to_string())?;

            let hits = edda_core::find_in_document(&document, &FindQuery::new(query.clone()));
            for hit in &hits {
                println!(
                    "paragraph={} chars={}..{} snippet={}",
                    hit.paragraph, hit.range.start, hit.range.end, hit.snippet
                );
            }
            println!("total={}", hits.len());
            Ok(())
        }
        _ => Err(USAGE.to_string()),
    }
}

/// Logging stays optional here: inspection must work even when the
/// platform log directory cannot be resolved or initialized.
fn init_logging_best_effort() {
    let Some(log_dir) = edda_core::default_log_dir() else {
        return;
    };
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(message) = edda_core::init_logging(edda_core::default_log_level(), log_dir) {
        eprintln!("edda: logging disabled: {message}");
    }
}
