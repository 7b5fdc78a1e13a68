//! Artifact finalization
//!
//! Downstream consumers look for the license banner at the very start of the
//! artifact, so it must be reproduced byte for byte.

use crate::error::{BuildError, BuildResult};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// License and attribution block prepended to every artifact
pub const BANNER: &str = include_str!("banner.txt");

/// Prepend [`BANNER`] and a newline to the artifact at `path`
///
/// The artifact must already exist. Calling this twice stamps the banner twice.
pub fn finalize(path: &Path) -> BuildResult<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| BuildError::artifact_missing(path, e))?;

    let mut original = Vec::new();
    file.read_to_end(&mut original)
        .map_err(|e| BuildError::io(path, e))?;

    let mut stamped = Vec::with_capacity(BANNER.len() + 1 + original.len());
    stamped.extend_from_slice(BANNER.as_bytes());
    stamped.push(b'\n');
    stamped.extend_from_slice(&original);

    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.write_all(&stamped))
        .and_then(|_| file.flush())
        .map_err(|e| BuildError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_banner_shape() {
        assert!(BANNER.starts_with("/*\n"));
        assert!(BANNER.ends_with(" */"));
        assert!(BANNER.contains("THE xxxxxxx      xxxxxxx TOOLKIT"));
        assert!(BANNER.contains("Copyright (c) 2012 The X Toolkit Developers <dev@goXTK.com>"));
        assert!(BANNER.contains("MORE CREDITS: https://raw.github.com/xtk/X/master/LICENSE"));
        assert_eq!(BANNER.lines().count(), 39);
    }

    #[test]
    fn test_banner_keeps_trailing_spaces() {
        let second_line = BANNER.lines().nth(1).unwrap();
        assert_eq!(second_line, " * ");
    }

    #[test]
    fn test_finalize_prepends_banner() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xtk.js");
        fs::write(&path, "var a=1;\n").unwrap();

        finalize(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\nvar a=1;\n", BANNER));
    }

    #[test]
    fn test_finalize_empty_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xtk.js");
        fs::write(&path, "").unwrap();

        finalize(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", BANNER));
    }

    #[test]
    fn test_finalize_twice_stamps_twice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xtk.js");
        fs::write(&path, "x();").unwrap();

        finalize(&path).unwrap();
        finalize(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{b}\n{b}\nx();", b = BANNER));
        assert_eq!(content.matches("MORE CREDITS").count(), 2);
    }

    #[test]
    fn test_finalize_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xtk.js");

        let result = finalize(&path);

        assert!(matches!(result, Err(BuildError::ArtifactMissing { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_finalize_preserves_binary_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("xtk.js");
        let body = [0xffu8, 0x00, b'\n', 0xfe];
        fs::write(&path, body).unwrap();

        finalize(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..BANNER.len()], BANNER.as_bytes());
        assert_eq!(bytes[BANNER.len()], b'\n');
        assert_eq!(&bytes[BANNER.len() + 1..], &body);
    }
}
