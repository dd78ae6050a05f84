//! End-to-end merge pipeline: scan root → discover → read → write document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use promptpack_shared::{FileExtensionSet, PromptPackError, Result};
use tracing::{debug, info, instrument};

use crate::document::{self, DocumentHeader};
use crate::reader;

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory to scan.
    pub root: PathBuf,
    /// Output file; relative paths resolve against the working directory.
    pub output: PathBuf,
    /// Extension patterns to collect.
    pub extensions: FileExtensionSet,
}

/// Result of a merge that produced a document.
#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// Absolute path of the written document.
    pub output_path: PathBuf,
    /// Number of file blocks written.
    pub file_count: usize,
    /// Blocks whose content is a reader placeholder.
    pub placeholder_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// What a merge run did.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// Nothing matched; no output file was created.
    NoFiles,
    /// The document was written.
    Written(MergeSummary),
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once discovery has finished.
    fn files_found(&self, count: usize);
    /// Called after each file block is written.
    fn file_written(&self, path: &Path, current: usize, total: usize);
    /// Called when the document is complete.
    fn done(&self, summary: &MergeSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn files_found(&self, _count: usize) {}
    fn file_written(&self, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _summary: &MergeSummary) {}
}

/// Run the full merge pipeline.
///
/// 1. Discover matching files under the root
/// 2. Stop without touching the output path if there are none
/// 3. Create (or truncate) the output file
/// 4. Stream header, manifest, and one block per file
#[instrument(skip_all, fields(root = %config.root.display(), output = %config.output.display()))]
pub fn merge(config: &MergeConfig, progress: &dyn ProgressReporter) -> Result<MergeOutcome> {
    let start = Instant::now();

    progress.phase("Discovering files");
    let files = promptpack_discovery::discover(&config.root, &config.extensions)?;
    progress.files_found(files.len());

    if files.is_empty() {
        info!("no matching files, skipping output");
        return Ok(MergeOutcome::NoFiles);
    }

    let root = std::path::absolute(&config.root).map_err(|e| PromptPackError::io(&config.root, e))?;
    let output_path =
        std::path::absolute(&config.output).map_err(|e| PromptPackError::io(&config.output, e))?;

    info!(count = files.len(), output = %output_path.display(), "writing merged document");
    progress.phase("Writing document");

    let file = File::create(&output_path).map_err(|e| PromptPackError::io(&output_path, e))?;
    let mut out = BufWriter::new(file);

    let header = DocumentHeader {
        root: &root,
        generated_at: Utc::now(),
    };

    let total = files.len();
    let mut written = 0;
    let mut placeholder_count = 0;

    document::write_document(&mut out, &header, &files, |file| {
        let result = reader::read_file(&file.path);
        if result.is_placeholder() {
            placeholder_count += 1;
        }
        debug!(
            path = %file.relative.display(),
            encoding = ?result.encoding(),
            "read file"
        );
        written += 1;
        progress.file_written(&file.relative, written, total);
        result.into_text()
    })
    .map_err(|e| PromptPackError::io(&output_path, e))?;

    out.flush().map_err(|e| PromptPackError::io(&output_path, e))?;

    let summary = MergeSummary {
        output_path,
        file_count: total,
        placeholder_count,
        elapsed: start.elapsed(),
    };

    info!(
        files = summary.file_count,
        placeholders = summary.placeholder_count,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "merge complete"
    );
    progress.done(&summary);

    Ok(MergeOutcome::Written(summary))
}
