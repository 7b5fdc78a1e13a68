//! Source discovery
//!
//! Walks the project root and yields every source file, lazily. Hidden
//! entries below the root are skipped, the way the dependency analyzer's own
//! tree scan does. Symlinks are not followed; cycles are not detected.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recursive scanner for files with a given extension
#[derive(Debug, Clone)]
pub struct SourceScanner {
    root: PathBuf,
    extension: String,
}

impl SourceScanner {
    /// Create a scanner for `extension` files (no leading dot) under `root`
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Lazily enumerate matching files
    ///
    /// Entries are visited in file-name order within each directory, so a
    /// fixed snapshot always yields the same sequence. Unreadable entries are
    /// skipped.
    pub fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(move |e| e.file_type().is_file() && self.has_extension(e.path()))
            .map(DirEntry::into_path)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension().and_then(OsStr::to_str) == Some(self.extension.as_str())
    }
}

/// Dot-prefixed names below the scan root
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn create_tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "// source\n").unwrap();
        }
        dir
    }

    fn relative_set(root: &Path, paths: impl Iterator<Item = PathBuf>) -> BTreeSet<String> {
        paths
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_finds_nested_sources() {
        let dir = create_tree(&["a.js", "core/b.js", "core/math/c.js", "README.md"]);
        let scanner = SourceScanner::new(dir.path(), "js");

        let found = relative_set(dir.path(), scanner.scan());
        let expected: BTreeSet<String> = ["a.js", "core/b.js", "core/math/c.js"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_scan_yields_absolute_paths_under_root() {
        let dir = create_tree(&["x/y.js"]);
        let scanner = SourceScanner::new(dir.path(), "js");

        for path in scanner.scan() {
            assert!(path.is_absolute());
            assert!(path.starts_with(dir.path()));
        }
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let dir = create_tree(&["visible.js", ".hidden.js", ".git/objects/x.js", "ok/.tmp.js"]);
        let scanner = SourceScanner::new(dir.path(), "js");

        let found = relative_set(dir.path(), scanner.scan());
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["visible.js"]);
    }

    #[test]
    fn test_scan_matches_extension_exactly() {
        let dir = create_tree(&["a.js", "b.json", "c.min.js", "d.jsx", "js"]);
        let scanner = SourceScanner::new(dir.path(), "js");

        let found = relative_set(dir.path(), scanner.scan());
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["a.js", "c.min.js"]
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let dir = create_tree(&["z.js", "m/a.js", "a.js", "m/z.js", "b/c/d.js"]);
        let scanner = SourceScanner::new(dir.path(), "js");

        let first: Vec<_> = scanner.scan().collect();
        let second: Vec<_> = scanner.scan().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(dir.path().join("nope"), "js");
        assert_eq!(scanner.scan().count(), 0);
    }
}
