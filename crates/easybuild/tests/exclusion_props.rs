//! Property tests for scanning and exclusion filtering

use easybuild::{ExclusionSet, MatchMode, SourceScanner};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Relative paths of one to three short lowercase segments, ending in `.js`
fn relative_source() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,5}", 1..=3).prop_map(|segments| {
        let mut path = segments.join("/");
        path.push_str(".js");
        path
    })
}

fn materialize(files: &BTreeSet<String>) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x\n").unwrap();
    }
    dir
}

fn on_disk(dir: &TempDir, files: &BTreeSet<String>) -> BTreeSet<PathBuf> {
    files
        .iter()
        .map(|f| dir.path().join(f))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn filter_keeps_exactly_unmatched_paths(
        files in prop::collection::btree_set(relative_source(), 0..12),
        patterns in prop::collection::vec("[a-z]{1,2}", 0..3),
    ) {
        let dir = materialize(&files);
        let root = dir.path();
        let set = ExclusionSet::new(patterns.clone(), MatchMode::Substring);
        let scanner = SourceScanner::new(root, "js");

        let kept: Vec<PathBuf> = set.filter(root, scanner.scan()).collect();
        let kept_set: BTreeSet<PathBuf> = kept.iter().cloned().collect();
        prop_assert_eq!(kept.len(), kept_set.len(), "duplicates in filter output");

        let expected: BTreeSet<PathBuf> = on_disk(&dir, &files)
            .into_iter()
            .filter(|p| {
                let text = p.to_string_lossy();
                !patterns.iter().any(|pat| text.contains(pat.as_str()))
            })
            .collect();
        prop_assert_eq!(kept_set, expected);
    }

    #[test]
    fn segment_filter_matches_whole_components(
        files in prop::collection::btree_set(relative_source(), 0..12),
        patterns in prop::collection::vec("[a-z]{1,2}", 0..3),
    ) {
        let dir = materialize(&files);
        let root = dir.path();
        let set = ExclusionSet::new(patterns.clone(), MatchMode::Segment);

        let kept: BTreeSet<PathBuf> = set
            .filter(root, SourceScanner::new(root, "js").scan())
            .collect();

        let expected: BTreeSet<PathBuf> = on_disk(&dir, &files)
            .into_iter()
            .filter(|p| {
                let relative = p.strip_prefix(root).unwrap();
                !relative
                    .iter()
                    .any(|seg| patterns.iter().any(|pat| seg.to_str() == Some(pat.as_str())))
            })
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn repeated_scans_agree(files in prop::collection::btree_set(relative_source(), 0..12)) {
        let dir = materialize(&files);
        let set = ExclusionSet::default();
        let scanner = SourceScanner::new(dir.path(), "js");

        let first: Vec<PathBuf> = set.filter(dir.path(), scanner.scan()).collect();
        let second: Vec<PathBuf> = set.filter(dir.path(), scanner.scan()).collect();
        prop_assert_eq!(first, second);
    }
}
