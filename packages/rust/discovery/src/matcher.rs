//! File-name matching against a [`FileExtensionSet`].
//!
//! Each pattern is compiled into one `globset` entry so a name can be tested
//! against every pattern in a single pass while still reporting each match
//! individually.

use std::ffi::OsStr;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use promptpack_shared::{ExtensionPattern, FileExtensionSet, PromptPackError, Result};

/// Compiled matcher for a set of extension patterns.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
    set: GlobSet,
    patterns: &'static [ExtensionPattern],
}

impl ExtensionMatcher {
    /// Compile every pattern of `extensions`.
    pub fn new(extensions: &FileExtensionSet) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in extensions.patterns() {
            let glob = GlobBuilder::new(pattern.glob)
                .case_insensitive(false)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    PromptPackError::config(format!("invalid pattern '{}': {e}", pattern.glob))
                })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| PromptPackError::config(format!("failed to compile patterns: {e}")))?;

        Ok(Self {
            set,
            patterns: extensions.patterns(),
        })
    }

    /// Indices of every pattern matching `file_name`, in pattern order.
    pub fn matches(&self, file_name: &OsStr) -> Vec<usize> {
        self.set.matches(file_name)
    }

    /// The pattern at `index`.
    pub fn pattern(&self, index: usize) -> Option<&'static ExtensionPattern> {
        self.patterns.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ExtensionMatcher {
        ExtensionMatcher::new(&FileExtensionSet::default()).expect("compile default set")
    }

    #[test]
    fn matches_known_extensions() {
        let m = matcher();
        for name in ["a.py", "b.js", "c.ts", "d.sh", "e.bat", "f.ps1", "g.php", "h.rb"] {
            assert_eq!(m.matches(OsStr::new(name)).len(), 1, "{name}");
        }
        for name in ["i.pl", "j.r", "k.sql", "l.cpp", "m.c", "n.java", "o.cs", "p.go", "q.rs"] {
            assert_eq!(m.matches(OsStr::new(name)).len(), 1, "{name}");
        }
    }

    #[test]
    fn rejects_other_names() {
        let m = matcher();
        for name in ["b.txt", "README.md", "py", "a.pyc", "a.py.bak", "Makefile", "x.rsx"] {
            assert!(m.matches(OsStr::new(name)).is_empty(), "{name}");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = matcher();
        assert!(m.matches(OsStr::new("analysis.R")).is_empty());
        assert!(m.matches(OsStr::new("MAIN.PY")).is_empty());
        assert_eq!(m.matches(OsStr::new("analysis.r")), vec![9]);
    }

    #[test]
    fn reports_matching_glob() {
        let m = matcher();
        let idx = m.matches(OsStr::new("main.go"));
        assert_eq!(idx.len(), 1);
        let pattern = m.pattern(idx[0]).unwrap();
        assert_eq!(pattern.glob, "*.go");
        assert_eq!(pattern.language, "Go");
        assert!(m.pattern(99).is_none());
    }
}
