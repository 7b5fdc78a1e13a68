//! Exclusion filtering
//!
//! Vendored, test and generated trees are kept out of the release build by
//! pattern. In the default [`MatchMode::Substring`] mode a pattern is a plain,
//! case-sensitive substring of the absolute path, so `lib` also rejects
//! `src/library.js` or any project living under a `lib` directory.
//! [`MatchMode::Segment`] compares whole components of the path relative to
//! the project root instead.

use easybuild_config::MatchMode;
use std::path::{Component, Path, PathBuf};

/// Patterns excluded from a default build
pub const DEFAULT_EXCLUSIONS: [&str; 3] = ["lib", "testing", "deps"];

/// Ordered exclusion patterns and how they are matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    patterns: Vec<String>,
    mode: MatchMode,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS, MatchMode::Substring)
    }
}

impl ExclusionSet {
    /// Create a set from patterns
    pub fn new<I, S>(patterns: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    /// Set that excludes nothing
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new(), MatchMode::Substring)
    }

    /// Switch the match mode
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Patterns in configuration order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Active match mode
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `path` (found under `root`) is excluded
    pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
        match self.mode {
            MatchMode::Substring => {
                let text = path.to_string_lossy();
                self.patterns.iter().any(|p| text.contains(p.as_str()))
            }
            MatchMode::Segment => {
                let relative = path.strip_prefix(root).unwrap_or(path);
                relative.components().any(|c| match c {
                    Component::Normal(segment) => self
                        .patterns
                        .iter()
                        .any(|p| segment.to_str() == Some(p.as_str())),
                    _ => false,
                })
            }
        }
    }

    /// Lazily drop excluded paths, preserving order
    pub fn filter<'a, I>(&'a self, root: &'a Path, paths: I) -> impl Iterator<Item = PathBuf> + 'a
    where
        I: IntoIterator<Item = PathBuf>,
        I::IntoIter: 'a,
    {
        paths
            .into_iter()
            .filter(move |p| !self.is_excluded(p, root))
    }
}

/// Source files handed to the compiler, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFileList {
    files: Vec<PathBuf>,
}

impl SourceFileList {
    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file survived
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in order
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }

    /// Files as a slice
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }
}

impl FromIterator<PathBuf> for SourceFileList {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SourceFileList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/p/src/core/a.js", false)]
    #[case("/p/lib/closure/base.js", true)]
    #[case("/p/src/testing/mock.js", true)]
    #[case("/p/deps.js", true)]
    #[case("/p/src/library.js", true)]
    #[case("/p/src/Lib.js", false)]
    fn test_substring_mode(#[case] path: &str, #[case] excluded: bool) {
        let set = ExclusionSet::default();
        assert_eq!(set.is_excluded(Path::new(path), Path::new("/p")), excluded);
    }

    #[rstest]
    #[case("/p/src/core/a.js", false)]
    #[case("/p/lib/closure/base.js", true)]
    #[case("/p/src/testing/mock.js", true)]
    #[case("/p/deps.js", false)]
    #[case("/p/src/library.js", false)]
    fn test_segment_mode(#[case] path: &str, #[case] excluded: bool) {
        let set = ExclusionSet::default().with_mode(MatchMode::Segment);
        assert_eq!(set.is_excluded(Path::new(path), Path::new("/p")), excluded);
    }

    #[test]
    fn test_substring_mode_sees_root_segments() {
        let set = ExclusionSet::default();
        let root = Path::new("/home/dev/lib/xtk");
        assert!(set.is_excluded(&root.join("src/a.js"), root));

        let set = set.with_mode(MatchMode::Segment);
        assert!(!set.is_excluded(&root.join("src/a.js"), root));
    }

    #[test]
    fn test_filter_preserves_order() {
        let set = ExclusionSet::new(["skip"], MatchMode::Substring);
        let root = Path::new("/r");
        let paths = vec![
            PathBuf::from("/r/c.js"),
            PathBuf::from("/r/skip/a.js"),
            PathBuf::from("/r/a.js"),
            PathBuf::from("/r/b.js"),
        ];

        let kept: SourceFileList = set.filter(root, paths).collect();
        assert_eq!(
            kept.as_slice(),
            &[
                PathBuf::from("/r/c.js"),
                PathBuf::from("/r/a.js"),
                PathBuf::from("/r/b.js"),
            ]
        );
    }

    #[test]
    fn test_empty_set_keeps_everything() {
        let set = ExclusionSet::empty();
        let paths = vec![PathBuf::from("/r/lib/a.js"), PathBuf::from("/r/b.js")];
        let kept: Vec<_> = set.filter(Path::new("/r"), paths.clone()).collect();
        assert_eq!(kept, paths);
    }
}
