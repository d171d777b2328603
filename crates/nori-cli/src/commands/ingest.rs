//! Batch ingestion of a directory of clinical documents
//!
//! Documents are independent of each other, so extraction runs across the
//! rayon pool; the sink is the one shared resource and sits behind a
//! mutex. A file that fails to read, parse or extract is logged, counted,
//! and left in place for inspection; it never aborts the batch.

use nori_core::{
    Document, Error, IngestConfig, JsonLinesSink, RecordSet, RecordSink, Result,
    extract_document,
};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::OutputFormat;
use crate::output::{IngestSummary, OutputFormatter};

pub fn ingest_command(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    processed_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => IngestConfig::load(&path)?,
        None => IngestConfig::discover(Path::new("."))?,
    };
    // CLI flags override file values
    if let Some(dir) = input {
        config.input_dir = dir;
    }
    if let Some(dir) = output {
        config.output_dir = dir;
    }
    if let Some(dir) = processed_dir {
        config.processed_dir = Some(dir);
    }

    let summary = run_ingest(&config)?;
    OutputFormatter::new(format).print_ingest(&summary)
}

/// Walk the input directory and run every document through the pipeline.
///
/// Only setup problems are fatal: a missing input directory or an
/// unopenable sink. Per-document failures end up in the summary.
pub fn run_ingest(config: &IngestConfig) -> Result<IngestSummary> {
    let documents = discover_documents(&config.input_dir)?;
    info!(
        "found {} documents in {}",
        documents.len(),
        config.input_dir.display()
    );
    if documents.is_empty() {
        return Ok(IngestSummary::default());
    }

    let sink = Mutex::new(JsonLinesSink::open(&config.output_dir)?);
    if let Some(dir) = &config.processed_dir {
        fs::create_dir_all(dir)?;
    }

    let outcomes: Vec<Option<RecordSet>> = documents
        .par_iter()
        .map(|path| {
            match process_document(path, &sink, config.processed_dir.as_deref()) {
                Ok(records) => Some(records),
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    None
                }
            }
        })
        .collect();

    let mut summary = IngestSummary::default();
    for outcome in &outcomes {
        match outcome {
            Some(records) => {
                summary.files_processed += 1;
                summary.absorb(records);
            }
            None => summary.files_failed += 1,
        }
    }
    info!(
        "ingest finished: {} processed, {} failed",
        summary.files_processed, summary.files_failed
    );
    Ok(summary)
}

fn process_document(
    path: &Path,
    sink: &Mutex<JsonLinesSink>,
    processed_dir: Option<&Path>,
) -> Result<RecordSet> {
    debug!("processing {}", path.display());
    let content = fs::read_to_string(path)?;
    let doc = Document::parse(&content)?;
    let records = extract_document(&doc)?;

    sink.lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .persist(&records)?;

    // Move the source aside only after its records are durable.
    if let Some(dir) = processed_dir {
        let target = dir.join(path.file_name().unwrap_or(path.as_os_str()));
        fs::rename(path, &target)?;
        debug!("moved {} to {}", path.display(), target.display());
    }
    Ok(records)
}

/// Visible `.xml` files under the input directory, sorted for a stable
/// processing order.
fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::config(format!(
            "input directory {} does not exist",
            dir.display()
        )));
    }
    let mut documents: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_xml(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    documents.sort();
    Ok(documents)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
