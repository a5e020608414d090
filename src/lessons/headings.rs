//! Heading scanner
//!
//! A heading is any line whose trimmed form starts with `#`, outside fenced code
//! blocks. Nesting is not tracked beyond the marker count.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lessons::slug::{slug, Anchors};

/// A heading found in a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Title with markers and surrounding whitespace removed
    pub title: String,
    /// Number of leading `#`
    pub level: usize,
    /// 1-indexed line number
    pub line: u32,
    /// Anchor id, unique within the document once scanned
    pub slug: String,
}

/// Tracks whether a line scanner is inside a ``` or ~~~ fence
#[derive(Debug, Default)]
pub(crate) struct FenceState {
    open: Option<char>,
}

impl FenceState {
    /// Feed a line; returns true if the line is fence syntax or fenced content
    pub(crate) fn consume(&mut self, trimmed: &str) -> bool {
        let fence = if trimmed.starts_with("```") {
            Some('`')
        } else if trimmed.starts_with("~~~") {
            Some('~')
        } else {
            None
        };

        match (self.open, fence) {
            (None, Some(c)) => {
                self.open = Some(c);
                true
            }
            (Some(open), Some(c)) if open == c => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

/// Parse a single line as a heading; `slug` is the bare title slug
pub fn parse_heading(line: &str, line_num: u32) -> Option<Heading> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') {
        return None;
    }

    let level = trimmed.chars().take_while(|&c| c == '#').count();
    let title = trimmed.trim_start_matches('#').trim();
    if title.is_empty() {
        return None;
    }

    Some(Heading {
        title: title.to_string(),
        level,
        line: line_num,
        slug: slug(title),
    })
}

/// Scan every heading in document order, giving repeated titles suffixed anchors
pub fn scan_headings(content: &str) -> Vec<Heading> {
    let mut fences = FenceState::default();
    let mut anchors = Anchors::default();

    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            if fences.consume(line.trim()) {
                return None;
            }
            let mut heading = parse_heading(line, idx as u32 + 1)?;
            heading.slug = anchors.claim(&heading.slug);
            Some(heading)
        })
        .collect()
}

/// Headings of one document, indexed by anchor
#[derive(Debug)]
pub struct HeadingIndex {
    headings: Vec<Heading>,
    by_slug: HashMap<String, usize>,
}

impl HeadingIndex {
    pub fn new(headings: Vec<Heading>) -> Self {
        let mut by_slug = HashMap::new();
        for (idx, heading) in headings.iter().enumerate() {
            by_slug.entry(heading.slug.clone()).or_insert(idx);
        }
        Self { headings, by_slug }
    }

    pub fn from_content(content: &str) -> Self {
        Self::new(scan_headings(content))
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// The heading an anchor points at
    pub fn resolve(&self, anchor: &str) -> Option<&Heading> {
        self.by_slug.get(anchor).map(|&idx| &self.headings[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        let h = parse_heading("### Вложенный раздел", 3).unwrap();
        assert_eq!(h.level, 3);
        assert_eq!(h.title, "Вложенный раздел");
        assert_eq!(h.slug, "вложенный-раздел");
        assert_eq!(h.line, 3);
    }

    #[test]
    fn test_parse_heading_rejects_plain_and_empty() {
        assert!(parse_heading("Просто текст", 1).is_none());
        assert!(parse_heading("##   ", 1).is_none());
    }

    #[test]
    fn test_scan_headings_skips_fenced_code() {
        let content = "# Урок\n\n```python\n# комментарий\nprint(1)\n```\n\n## Итоги\n";
        let headings = scan_headings(content);
        let titles: Vec<_> = headings.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Урок", "Итоги"]);
        assert_eq!(headings[1].line, 8);
    }

    #[test]
    fn test_scan_headings_tilde_fence_ignores_backticks() {
        let content = "~~~\n```\n# внутри\n~~~\n## Снаружи\n";
        let headings = scan_headings(content);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].title, "Снаружи");
    }

    #[test]
    fn test_scan_headings_suffixes_repeated_titles() {
        let content = "## Списки\n### Пример\n## Кортежи\n### Пример\n## Пример\n";
        let slugs: Vec<_> = scan_headings(content).into_iter().map(|h| h.slug).collect();
        assert_eq!(
            slugs,
            vec!["списки", "пример", "кортежи", "пример-1", "пример-2"]
        );
    }

    #[test]
    fn test_index_resolution() {
        let content = "## Циклы\n## Пример\n### Пример\n";
        let index = HeadingIndex::from_content(content);
        assert_eq!(index.len(), 3);

        assert_eq!(index.resolve("циклы").map(|h| h.line), Some(1));
        assert_eq!(index.resolve("пример").map(|h| h.line), Some(2));
        assert_eq!(index.resolve("пример-1").map(|h| h.line), Some(3));
        assert!(index.resolve("нет").is_none());
    }
}
