//! Lesson discovery
//!
//! Lessons are the `*.md` files directly under the root whose name starts with a digit.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::LessonError;
use crate::core::paths::{file_name, make_relative};

/// A lesson file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFile {
    pub path: PathBuf,
    /// Path relative to the root, '/'-separated
    pub name: String,
    /// Number parsed from the leading digits of the file name
    pub number: u64,
}

/// Parse the leading digit run of a file name
pub fn lesson_number(name: &str) -> Option<u64> {
    let digits: &str = &name[..name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len())];
    digits.parse().ok()
}

fn is_lesson_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit())
        && Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

/// An entry the scan could not turn into a lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: String,
    pub reason: String,
}

/// Lessons found under a root, plus the entries that were passed over
#[derive(Debug, Default)]
pub struct LessonScan {
    pub lessons: Vec<LessonFile>,
    pub skipped: Vec<Skipped>,
}

/// Find every lesson under `root`, sorted by number then name
pub fn scan_lessons(root: &Path) -> Result<LessonScan, LessonError> {
    if !root.is_dir() {
        return Err(LessonError::NotADirectory(root.to_path_buf()));
    }

    let mut scan = LessonScan::default();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| make_relative(p, root).unwrap_or_else(|| p.display().to_string()))
                    .unwrap_or_default();
                scan.skipped.push(Skipped {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let Some(name) = file_name(&path) else {
            continue;
        };
        if !is_lesson_name(name) {
            continue;
        }
        let relative = make_relative(&path, root).unwrap_or_else(|| name.to_string());

        match lesson_number(name) {
            Some(number) => scan.lessons.push(LessonFile {
                path,
                name: relative,
                number,
            }),
            None => scan.skipped.push(Skipped {
                path: relative,
                reason: "lesson number does not fit in 64 bits".to_string(),
            }),
        }
    }

    scan.lessons
        .sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));
    Ok(scan)
}

/// Keep lessons numbered `from` or higher
pub fn lessons_from(lessons: Vec<LessonFile>, from: u64) -> Vec<LessonFile> {
    lessons.into_iter().filter(|l| l.number >= from).collect()
}
