//! Best-effort file reader with encoding fallback.
//!
//! A file is read once and its bytes are handed to each candidate encoding in
//! turn. Problems never escape as errors: they become placeholder text that is
//! written into the document in place of the file's content.

use std::path::Path;

use tracing::{debug, warn};

use crate::encoding::{CANDIDATE_ENCODINGS, TextEncoding};

/// Prefix shared by every placeholder the reader produces.
pub const PLACEHOLDER_MARKER: &str = "# ERROR:";

/// Outcome of reading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// The bytes decoded cleanly under `encoding`.
    Decoded {
        text: String,
        encoding: TextEncoding,
    },
    /// No candidate encoding accepted the bytes.
    Undecodable,
    /// The file could not be read at all.
    Unreadable { message: String },
}

impl ReadResult {
    /// True for the two failure variants.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Decoded { .. })
    }

    /// Encoding that succeeded, if any.
    pub fn encoding(&self) -> Option<TextEncoding> {
        match self {
            Self::Decoded { encoding, .. } => Some(*encoding),
            _ => None,
        }
    }

    /// Text to insert into the document.
    pub fn into_text(self) -> String {
        match self {
            Self::Decoded { text, .. } => text,
            Self::Undecodable => {
                format!("{PLACEHOLDER_MARKER} file could not be decoded with any supported encoding")
            }
            Self::Unreadable { message } => {
                format!("{PLACEHOLDER_MARKER} could not read file - {message}")
            }
        }
    }
}

/// Read and decode the file at `path`.
pub fn read_file(path: &Path) -> ReadResult {
    match std::fs::read(path) {
        Ok(bytes) => decode_bytes(&bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            ReadResult::Unreadable {
                message: e.to_string(),
            }
        }
    }
}

/// Read the file at `path`, returning its text or a placeholder.
pub fn read_file_text(path: &Path) -> String {
    read_file(path).into_text()
}

/// Try each candidate encoding in order; the first success wins.
pub fn decode_bytes(bytes: &[u8]) -> ReadResult {
    for &encoding in CANDIDATE_ENCODINGS {
        match encoding.decode(bytes) {
            Ok(text) => return ReadResult::Decoded { text, encoding },
            Err(e) => debug!(error = %e, "decode attempt failed"),
        }
    }
    ReadResult::Undecodable
}
