//! Core domain types for promptpack runs.

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Extension patterns
// ---------------------------------------------------------------------------

/// A file-name glob and the language it identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionPattern {
    /// Glob matched against the bare file name (e.g. `*.py`).
    pub glob: &'static str,
    /// Human-readable language label.
    pub language: &'static str,
}

const fn pattern(glob: &'static str, language: &'static str) -> ExtensionPattern {
    ExtensionPattern { glob, language }
}

/// Script and source extensions collected by default, in search order.
pub const SCRIPT_EXTENSIONS: &[ExtensionPattern] = &[
    pattern("*.py", "Python"),
    pattern("*.js", "JavaScript"),
    pattern("*.ts", "TypeScript"),
    pattern("*.sh", "Shell"),
    pattern("*.bat", "Batch"),
    pattern("*.ps1", "PowerShell"),
    pattern("*.php", "PHP"),
    pattern("*.rb", "Ruby"),
    pattern("*.pl", "Perl"),
    pattern("*.r", "R"),
    pattern("*.sql", "SQL"),
    pattern("*.cpp", "C++"),
    pattern("*.c", "C"),
    pattern("*.java", "Java"),
    pattern("*.cs", "C#"),
    pattern("*.go", "Go"),
    pattern("*.rs", "Rust"),
];

/// Ordered, immutable set of extension patterns used for discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileExtensionSet {
    patterns: &'static [ExtensionPattern],
}

impl FileExtensionSet {
    /// Wrap a static pattern table.
    pub const fn new(patterns: &'static [ExtensionPattern]) -> Self {
        Self { patterns }
    }

    /// The patterns, in search order.
    pub fn patterns(&self) -> &'static [ExtensionPattern] {
        self.patterns
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for FileExtensionSet {
    fn default() -> Self {
        Self::new(SCRIPT_EXTENSIONS)
    }
}

// ---------------------------------------------------------------------------
// DiscoveredFile
// ---------------------------------------------------------------------------

/// A file found under the scan root.
///
/// Size is deliberately not captured here; the writer queries it when the
/// file's block is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, using platform separators.
    pub relative: PathBuf,
}

impl DiscoveredFile {
    /// Build from an absolute path under `root`.
    ///
    /// Paths outside `root` keep their full form as the relative path.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        Self { path, relative }
    }

    /// Relative path for display.
    pub fn display_relative(&self) -> std::path::Display<'_> {
        self.relative.display()
    }
}
