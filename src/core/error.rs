//! Typed errors surfaced by lessonkit
//!
//! Passes return `anyhow::Result`; these variants are the failures worth naming.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("lesson root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{count} lesson(s) have issues")]
    StrictCheckFailed { count: usize },
}
