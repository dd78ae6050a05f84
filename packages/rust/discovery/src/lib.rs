//! Recursive source-file discovery.
//!
//! Walks a scan root at unbounded depth and collects every file whose name
//! matches one of the configured extension patterns. Results are absolute
//! paths sorted by their full path string, so two runs over an unchanged tree
//! produce identical output.

mod matcher;

use std::path::{Path, PathBuf};

use promptpack_shared::{DiscoveredFile, FileExtensionSet, PromptPackError, Result};
use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

pub use matcher::ExtensionMatcher;

/// Discover files under `root` matching any pattern in `extensions`.
///
/// A root that does not exist, or is not a directory, yields an empty list.
/// Hidden entries (names starting with `.`) below the root are skipped.
/// Unreadable subdirectories and symlink cycles are logged and skipped; only a
/// failure on the root itself is returned as an error.
///
/// A path is listed once for every pattern it matches.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover(root: &Path, extensions: &FileExtensionSet) -> Result<Vec<DiscoveredFile>> {
    if !root.is_dir() {
        info!("scan root is not a directory, nothing to discover");
        return Ok(Vec::new());
    }

    let root = absolute_root(root)?;
    let matcher = ExtensionMatcher::new(extensions)?;

    let walker = WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut found = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(PromptPackError::discovery(&root, e.to_string()));
            }
            Err(e) => {
                warn!(
                    path = ?e.path(),
                    loop_ancestor = ?e.loop_ancestor(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        for index in matcher.matches(entry.file_name()) {
            if let Some(pattern) = matcher.pattern(index) {
                debug!(
                    path = %entry.path().display(),
                    pattern = pattern.glob,
                    language = pattern.language,
                    "matched"
                );
            }
            found.push(entry.path().to_path_buf());
        }
    }

    found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    info!(count = found.len(), "discovery complete");

    Ok(found
        .into_iter()
        .map(|path| DiscoveredFile::new(&root, path))
        .collect())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Make `root` absolute against the current working directory.
fn absolute_root(root: &Path) -> Result<PathBuf> {
    std::path::absolute(root).map_err(|e| PromptPackError::io(root, e))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().starts_with(b".")
}

#[cfg(test)]
mod tests {
    use promptpack_shared::ExtensionPattern;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pp-discovery-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    fn relatives(files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.relative.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_only_matching_extensions() {
        let tmp = temp_dir();
        touch(&tmp, "a.py");
        touch(&tmp, "b.txt");
        touch(&tmp, "notes.md");
        touch(&tmp, "run.sh");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["a.py", "run.sh"]);
        assert!(files.iter().all(|f| f.path.is_absolute()));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn finds_nested_files_at_any_depth() {
        let tmp = temp_dir();
        touch(&tmp, "sub/dir/c.go");
        touch(&tmp, "x/y/z/w/deep.rs");
        touch(&tmp, "top.c");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["sub/dir/c.go", "top.c", "x/y/z/w/deep.rs"]);
        assert_eq!(files[0].relative, Path::new("sub").join("dir").join("c.go"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn results_sorted_by_full_path_string() {
        let tmp = temp_dir();
        touch(&tmp, "b.py");
        touch(&tmp, "a-b/z.py");
        touch(&tmp, "a/y.py");
        touch(&tmp, "A.js");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        assert_eq!(paths, sorted);
        assert_eq!(files.len(), 4);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn discovery_is_deterministic() {
        let tmp = temp_dir();
        touch(&tmp, "one.rb");
        touch(&tmp, "two/three.pl");
        touch(&tmp, "two/four.sql");

        let first = discover(&tmp, &FileExtensionSet::default()).unwrap();
        let second = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(first, second);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn skips_hidden_entries() {
        let tmp = temp_dir();
        touch(&tmp, ".hidden.py");
        touch(&tmp, ".git/hooks/pre-commit.sh");
        touch(&tmp, "visible.py");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["visible.py"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn hidden_root_is_still_scanned() {
        let tmp = temp_dir().join(".scan-root");
        touch(&tmp, "main.go");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["main.go"]);

        let _ = std::fs::remove_dir_all(tmp.parent().unwrap());
    }

    #[test]
    fn missing_root_yields_empty() {
        let tmp = temp_dir();
        let files = discover(&tmp.join("does-not-exist"), &FileExtensionSet::default()).unwrap();
        assert!(files.is_empty());

        touch(&tmp, "file.py");
        let files = discover(&tmp.join("file.py"), &FileExtensionSet::default()).unwrap();
        assert!(files.is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn directories_named_like_sources_are_ignored() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("pkg.py")).unwrap();
        touch(&tmp, "pkg.py/inner.py");

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["pkg.py/inner.py"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_extension_set_finds_nothing() {
        let tmp = temp_dir();
        touch(&tmp, "a.py");

        let files = discover(&tmp, &FileExtensionSet::new(&[])).unwrap();
        assert!(files.is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn overlapping_patterns_list_path_once_per_match() {
        static OVERLAPPING: &[ExtensionPattern] = &[
            ExtensionPattern {
                glob: "*.py",
                language: "Python",
            },
            ExtensionPattern {
                glob: "a*",
                language: "Anything starting with a",
            },
        ];

        let tmp = temp_dir();
        touch(&tmp, "a.py");
        touch(&tmp, "b.py");

        let files = discover(&tmp, &FileExtensionSet::new(OVERLAPPING)).unwrap();
        assert_eq!(relatives(&files), vec!["a.py", "a.py", "b.py"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    // Linux filesystems accept arbitrary bytes in names; APFS does not.
    #[cfg(target_os = "linux")]
    #[test]
    fn skips_hidden_dir_with_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = temp_dir();
        let hidden = tmp.join(OsStr::from_bytes(b".h\xFFidden"));
        std::fs::create_dir_all(&hidden).unwrap();
        std::fs::write(hidden.join("x.py"), b"x").unwrap();

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert!(files.is_empty(), "{files:?}");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_is_skipped() {
        let tmp = temp_dir();
        touch(&tmp, "sub/x.rs");
        std::os::unix::fs::symlink(&tmp, tmp.join("sub").join("loop")).unwrap();

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["sub/x.rs"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn follows_directory_symlinks() {
        let tmp = temp_dir();
        let target = temp_dir();
        touch(&target, "linked.ts");
        std::os::unix::fs::symlink(&target, tmp.join("link")).unwrap();

        let files = discover(&tmp, &FileExtensionSet::default()).unwrap();
        assert_eq!(relatives(&files), vec!["link/linked.ts"]);

        let _ = std::fs::remove_dir_all(&tmp);
        let _ = std::fs::remove_dir_all(&target);
    }
}
