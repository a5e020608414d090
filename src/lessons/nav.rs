//! Quick navigation block
//!
//! The block starts at the `## 📖 Быстрая навигация` heading and runs to the first
//! `---` line after it:
//!
//! ```text
//! ## 📖 Быстрая навигация
//!
//! - [[#Введение]](#введение)
//! - [[#Циклы]](#циклы)
//!
//! **[[#📚 Дополнительная информация]](#дополнительная-информация)**
//!
//! ---
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::util::join_lines;
use crate::lessons::headings::{scan_headings, FenceState, Heading};
use crate::lessons::markers::{Markers, LEGACY_NAV_END, NAV_DELIMITER, NAV_HEADING, NAV_SKIP_PREFIX};
use crate::lessons::sections::is_additional_heading;

/// Link target: `](#anchor)`
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\(#([^)]+)\)").expect("Invalid LINK_RE"));

/// A link inside the navigation block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub anchor: String,
    /// 1-indexed line number
    pub line: u32,
    pub text: String,
}

/// Links found in the first navigation block of a document
#[derive(Debug, Clone, Default)]
pub struct NavScan {
    /// Line of the navigation heading, if any
    pub heading_line: Option<u32>,
    /// Whether a delimiter (or legacy end marker) closed the block
    pub terminated: bool,
    pub links: Vec<NavLink>,
}

/// Whether a line opens a navigation block
pub fn is_nav_heading(line: &str) -> bool {
    line.trim().starts_with(NAV_HEADING)
}

/// Extract the anchor target from a link line
pub fn link_anchor(line: &str) -> Option<&str> {
    LINK_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Collect the links of the first navigation block
pub fn scan_links(content: &str) -> NavScan {
    let mut scan = NavScan::default();
    let mut fences = FenceState::default();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx as u32 + 1;

        if scan.heading_line.is_none() {
            if !fences.consume(line.trim()) && is_nav_heading(line) {
                scan.heading_line = Some(line_num);
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with(NAV_DELIMITER) || trimmed.starts_with(LEGACY_NAV_END) {
            scan.terminated = true;
            break;
        }

        if line.contains("](") {
            if let Some(anchor) = link_anchor(line) {
                scan.links.push(NavLink {
                    anchor: anchor.to_string(),
                    line: line_num,
                    text: trimmed.to_string(),
                });
            }
        }
    }

    scan
}

/// Build the navigation link lines for a document's headings
pub fn build_nav(headings: &[Heading], markers: &Markers) -> Vec<String> {
    let mut lines = Vec::new();
    let mut additional: Option<&Heading> = None;

    for heading in headings.iter().filter(|h| h.level == 2) {
        if heading.title.starts_with(NAV_SKIP_PREFIX) {
            continue;
        }
        if is_additional_heading(heading, markers) {
            additional.get_or_insert(heading);
            continue;
        }
        lines.push(format!("- [[#{}]](#{})", heading.title, heading.slug));
    }

    if let Some(heading) = additional {
        lines.push(String::new());
        lines.push(format!("**[[#{}]](#{})**", heading.title, heading.slug));
    }

    lines
}

/// Outcome of rebuilding the navigation blocks of a document
#[derive(Debug, Clone)]
pub struct NavRebuild {
    pub text: String,
    /// Number of blocks that were regenerated
    pub blocks: usize,
    /// Lines of navigation headings with no closing delimiter (left untouched)
    pub unterminated: Vec<u32>,
}

/// Regenerate every navigation block from the document's level-2 headings.
///
/// A document where no block was regenerated comes back byte for byte.
pub fn rebuild_nav(content: &str, markers: &Markers) -> NavRebuild {
    let lines: Vec<&str> = content.lines().collect();
    let nav_lines = build_nav(&scan_headings(content), markers);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut fences = FenceState::default();
    let mut blocks = 0;
    let mut unterminated = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if fences.consume(line.trim()) || !is_nav_heading(line) {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        let delimiter = lines[i + 1..]
            .iter()
            .position(|l| l.trim().starts_with(NAV_DELIMITER))
            .map(|offset| i + 1 + offset);

        match delimiter {
            Some(end) => {
                out.push(line.to_string());
                out.push(String::new());
                out.extend(nav_lines.iter().cloned());
                out.push(String::new());
                out.push(lines[end].to_string());
                blocks += 1;
                i = end + 1;
            }
            None => {
                unterminated.push(i as u32 + 1);
                out.push(line.to_string());
                i += 1;
            }
        }
    }

    let text = if blocks == 0 {
        content.to_string()
    } else {
        join_lines(&out, content.ends_with('\n'))
    };

    NavRebuild {
        text,
        blocks,
        unterminated,
    }
}
