//! Single-document extraction to stdout

use nori_core::{Document, Result, extract_document};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::OutputFormat;
use crate::output::OutputFormatter;

/// Extract one document and print its records without persisting anything.
pub fn show_command(file: PathBuf, format: OutputFormat) -> Result<()> {
    debug!("extracting {}", file.display());
    let content = fs::read_to_string(&file)?;
    let doc = Document::parse(&content)?;
    let records = extract_document(&doc)?;
    OutputFormatter::new(format).print_records(&records)
}
