//! Merged prompt document writer.
//!
//! Layout, top to bottom:
//! ```text
//! ====…  header (title, root, file count, timestamp)
//! IMPORTANT INSTRUCTION FOR AI: …
//! FILE LIST:  numbered relative paths
//! ACTUAL CODE CONTENT STARTS HERE:
//! ====…  FILE / Size banner, then the file's text, once per file
//! ```
//! Content is streamed one file at a time; nothing but the path list is held
//! for the whole document.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use promptpack_shared::DiscoveredFile;
use tracing::warn;

const RULE_WIDTH: usize = 80;
const LIST_RULE_WIDTH: usize = 40;

const TITLE: &str = "ALL SCRIPT FILES - PROMPT";

const INSTRUCTION: &str = "IMPORTANT INSTRUCTION FOR AI:\n\
Please ignore the header information above (file list, directory info, etc.) \
when processing this prompt. Focus only on the actual code content below.\n\
The header is just for organization purposes.\n";

/// Written in place of content that is blank after trimming.
pub const EMPTY_PLACEHOLDER: &str = "# File is empty or unreadable";

/// Metadata shown in the document header.
#[derive(Debug, Clone)]
pub struct DocumentHeader<'a> {
    /// Absolute scan root.
    pub root: &'a Path,
    /// When the document was produced.
    pub generated_at: DateTime<Utc>,
}

/// Write the full document for `files` to `out`.
///
/// `content` is called once per file, in order, right before that file's
/// block is written. Its return value is inserted verbatim.
pub fn write_document<W, F>(
    out: &mut W,
    header: &DocumentHeader<'_>,
    files: &[DiscoveredFile],
    mut content: F,
) -> io::Result<()>
where
    W: Write,
    F: FnMut(&DiscoveredFile) -> String,
{
    let rule = "=".repeat(RULE_WIDTH);
    let list_rule = "-".repeat(LIST_RULE_WIDTH);

    // Header
    writeln!(out, "{rule}")?;
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Root Directory: {}", header.root.display())?;
    writeln!(out, "Total Files: {}", files.len())?;
    writeln!(
        out,
        "Generated At: {}",
        header.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "{rule}\n")?;

    // Preamble
    write!(out, "{INSTRUCTION}")?;
    writeln!(out, "{rule}\n")?;

    // Manifest
    writeln!(out, "FILE LIST:")?;
    writeln!(out, "{list_rule}")?;
    for (i, file) in files.iter().enumerate() {
        writeln!(out, "{:3}. {}", i + 1, file.display_relative())?;
    }
    writeln!(out, "{list_rule}\n")?;

    writeln!(out, "ACTUAL CODE CONTENT STARTS HERE:")?;
    writeln!(out, "{rule}\n")?;

    // Content blocks
    for file in files {
        writeln!(out, "{rule}")?;
        writeln!(out, "FILE: {}", file.display_relative())?;
        match file_size(&file.path) {
            Some(size) => writeln!(out, "Size: {size} bytes")?,
            None => writeln!(out, "Size: unknown")?,
        }
        writeln!(out, "{rule}")?;

        let text = content(file);
        if text.trim().is_empty() {
            out.write_all(EMPTY_PLACEHOLDER.as_bytes())?;
        } else {
            out.write_all(text.as_bytes())?;
        }
        out.write_all(b"\n\n")?;
    }

    Ok(())
}

/// Current on-disk size of `path`, queried independently of the reader.
fn file_size(path: &Path) -> Option<u64> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.len()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not query file size");
            None
        }
    }
}
