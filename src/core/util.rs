//! Common utilities

use std::path::Path;
use xxhash_rust::xxh3::xxh3_64;

use crate::core::error::LessonError;
use crate::core::model::Meta;

/// Compute the XXH3 hash of bytes as 16 hex digits
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, LessonError> {
    std::fs::read_to_string(path).map_err(|source| LessonError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace a file's content with `text`
pub fn write_text(path: &Path, text: &str) -> Result<(), LessonError> {
    std::fs::write(path, text).map_err(|source| LessonError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Metadata describing `text` as it stands after a pass
pub fn text_meta(text: &str, changed: bool) -> Meta {
    Meta {
        size: Some(text.len() as u64),
        hash: Some(hash_bytes(text.as_bytes())),
        changed,
    }
}

/// Join lines with '\n', keeping a trailing newline only if the source had one
pub fn join_lines(lines: &[String], trailing_newline: bool) -> String {
    let mut out = lines.join("\n");
    if trailing_newline {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let hash = hash_bytes(b"hello world");
        assert_eq!(hash.len(), 16);
        assert_eq!(hash, hash_bytes(b"hello world"));
        assert_ne!(hash, hash_bytes(b"hello world!"));
    }

    #[test]
    fn test_text_meta() {
        let meta = text_meta("абв", true);
        assert_eq!(meta.size, Some(6));
        assert!(meta.hash.is_some());
        assert!(meta.changed);
    }

    #[test]
    fn test_join_lines_trailing_newline() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_lines(&lines, true), "a\nb\n");
        assert_eq!(join_lines(&lines, false), "a\nb");
    }

    #[test]
    fn test_read_write_roundtrip_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("1 Intro.md");
        write_text(&path, "## Привет\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "## Привет\n");
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_text(&temp.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, LessonError::Read { .. }));
    }

    #[test]
    fn test_read_invalid_utf8_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("2 Bad.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_text(&path), Err(LessonError::Read { .. })));
    }
}
