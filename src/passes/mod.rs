//! Passes module - one runner per subcommand
//!
//! Provides:
//! - navigate: rebuild quick navigation blocks
//! - check: navigation links and section health per lesson
//! - audit: section presence, duplicates and stubs
//! - cleanup: legacy link removal and template stripping
//! - inspect: slug and heading listing for a single input

pub mod audit;
pub mod check;
pub mod cleanup;
pub mod inspect;
pub mod navigate;

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::core::model::{Pass, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{read_text, text_meta, write_text};
use crate::lessons::markers::Markers;
use crate::lessons::scan::{lessons_from, scan_lessons, LessonFile};

/// Shared state for one pass invocation
#[derive(Debug, Clone)]
pub struct PassContext {
    pub root: PathBuf,
    pub render: RenderConfig,
    pub markers: Markers,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl PassContext {
    pub fn new(root: impl Into<PathBuf>, render: RenderConfig) -> Self {
        Self {
            root: root.into(),
            render,
            markers: Markers::default(),
            dry_run: false,
            quiet: false,
            verbose: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lessons under root numbered `from` or higher
    pub fn lessons(&self, from: u64) -> Result<Vec<LessonFile>> {
        let scan = scan_lessons(&self.root)?;
        for skipped in &scan.skipped {
            self.warn(&format!("skipped {}: {}", skipped.path, skipped.reason));
        }
        let lessons = lessons_from(scan.lessons, from);
        self.debug(&format!(
            "{} lesson file(s) under {} (from {})",
            lessons.len(),
            self.root.display(),
            from
        ));
        Ok(lessons)
    }

    /// Print results to stdout in the configured format
    pub fn emit(&self, result_set: &ResultSet) -> Result<()> {
        let renderer = Renderer::with_config(self.render);
        renderer.render_to(result_set, std::io::stdout().lock())?;
        Ok(())
    }

    /// Human summary line on stderr
    pub fn report(&self, line: &str) {
        if !self.quiet {
            eprintln!("{}", line.bold());
        }
    }

    /// Warning on stderr unless quiet
    pub fn warn(&self, line: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠".yellow(), line);
        }
    }

    /// Diagnostics on stderr, only with --verbose
    pub fn debug(&self, line: &str) {
        if self.verbose {
            eprintln!("{} {}", "·".dimmed(), line.dimmed());
        }
    }
}

/// Apply `transform` to every lesson and write back the ones whose text changed.
///
/// `transform` returns the new text plus any extra result items for that lesson.
/// Returns the emitted items and the number of changed lessons.
pub fn rewrite_lessons<F>(
    ctx: &PassContext,
    lessons: &[LessonFile],
    pass: Pass,
    mut transform: F,
) -> Result<(ResultSet, usize)>
where
    F: FnMut(&LessonFile, &str) -> (String, Vec<ResultItem>),
{
    let mut result_set = ResultSet::new();
    let mut changed = 0;

    for lesson in lessons {
        let original = read_text(&lesson.path)?;
        let (text, extra) = transform(lesson, &original);
        result_set.extend(extra);

        if text == original {
            ctx.debug(&format!("unchanged: {}", lesson.name));
            continue;
        }

        if !ctx.dry_run {
            write_text(&lesson.path, &text)?;
        }
        changed += 1;

        result_set.push(
            ResultItem::change(lesson.name.clone(), pass)
                .with_meta(text_meta(&text, true))
                .with_data(serde_json::json!({
                    "lesson": lesson.number,
                    "dry_run": ctx.dry_run,
                })),
        );
    }

    Ok((result_set, changed))
}
