//! Struct listing command

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;
use structproto::{Catalog, ParseOptions, RecordType};

/// One line of the listing.
pub fn describe(record: &RecordType) -> String {
    let visible = record.fields.iter().filter(|f| f.exported).count();
    let visibility = if record.exported { "pub" } else { "private" };
    format!(
        "{} ({}) - {} visible field(s), {}",
        record.name, record.qualified_name, visible, visibility
    )
}

/// Run the list command
pub fn run(config_path: Option<String>, source: Option<String>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let source = source
        .map(PathBuf::from)
        .or(config.generate.source)
        .context("No source file given (use --source or [generate] source)")?;

    let options = ParseOptions {
        time_like: config.types.time_like,
    };
    let catalog = Catalog::parse_file(&source, &options)
        .with_context(|| format!("Failed to parse source: {:?}", source))?;

    println!("Structs in {}:", source.display());
    for record in catalog.records() {
        println!("  {}", describe(record));
    }
    println!("\n{} struct(s) found", catalog.records().len());

    Ok(())
}
