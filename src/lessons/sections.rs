//! The "Additional information" section
//!
//! Checks:
//! - presence, by heading slug (with or without the 📚 prefix)
//! - duplicate section headings
//! - the boilerplate template (every template marker present)
//! - "to be written" stubs
//!
//! Rewrites:
//! - replacing the template with the stub placeholder
//! - removing legacy bold links to the section

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lessons::headings::{scan_headings, Heading};
use crate::lessons::markers::Markers;
use crate::lessons::slug::slug;

/// Legacy bold links to the section, written before the navigation block carried one
static LEGACY_LINK_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"\*\*\[Дополнительная информация\]\(#дополнительная-информация\)\*\*\n?")
            .expect("Invalid legacy link regex"),
        Regex::new(
            r"\*\*\[\[#Дополнительная информация\]\]\(#дополнительная-информация\)\*\*\n?",
        )
        .expect("Invalid legacy link regex"),
    ]
});

/// State of a lesson's "Additional information" section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Missing,
    Template,
    Stub,
    Filled,
}

/// Whether a heading is the "Additional information" section heading.
///
/// Compares the bare title slug, so repeats with a suffixed anchor still count.
pub fn is_additional_heading(heading: &Heading, markers: &Markers) -> bool {
    heading.level == 2 && slug(&heading.title) == slug(markers.additional_title)
}

/// All "Additional information" section headings, in document order
pub fn additional_sections(content: &str, markers: &Markers) -> Vec<Heading> {
    scan_headings(content)
        .into_iter()
        .filter(|h| is_additional_heading(h, markers))
        .collect()
}

/// True only when every template marker is present
pub fn has_template(content: &str, markers: &Markers) -> bool {
    markers.template.iter().all(|marker| content.contains(marker))
}

/// True when any stub marker is present
pub fn has_stub(content: &str, markers: &Markers) -> bool {
    markers.stub.iter().any(|marker| content.contains(marker))
}

/// Classify the section of a lesson
pub fn section_status(content: &str, markers: &Markers) -> SectionStatus {
    if additional_sections(content, markers).is_empty() {
        SectionStatus::Missing
    } else if has_template(content, markers) {
        SectionStatus::Template
    } else if has_stub(content, markers) {
        SectionStatus::Stub
    } else {
        SectionStatus::Filled
    }
}

/// Replace a template section (and everything after it) with the stub placeholder.
///
/// Returns `None` when the lesson has no template or the section heading is not
/// followed by a blank line and some body.
pub fn strip_template(content: &str, markers: &Markers) -> Option<String> {
    if !has_template(content, markers) {
        return None;
    }

    let opener = format!("{}\n\n", markers.section_heading);
    let start = content.find(&opener)?;
    if content.len() == start + opener.len() {
        return None;
    }

    let before = content[..start].trim_end();
    let mut out = String::with_capacity(before.len() + opener.len() + 128);
    if !before.is_empty() {
        out.push_str(before);
        out.push_str("\n\n");
    }
    out.push_str(&opener);
    out.push_str(markers.stub_placeholder);
    out.push('\n');

    Some(out)
}

/// Remove legacy bold links to the section
pub fn remove_legacy_links(content: &str) -> String {
    LEGACY_LINK_RES
        .iter()
        .fold(content.to_string(), |text, re| re.replace_all(&text, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE_LESSON: &str = "# 14. Словари\n\
\n\
Основной текст.\n\
\n\
\n\
## 📚 Дополнительная информация\n\
\n\
```python\n\
# Пример кода, демонстрирующий основные концепции\n\
# из этого урока\n\
x = 1\n\
\n\
# Более сложный пример с комбинированием\n\
y = 2\n\
```\n";

    #[test]
    fn test_has_template_requires_every_marker() {
        let markers = Markers::default();
        assert!(has_template(TEMPLATE_LESSON, &markers));

        for marker in &markers.template {
            let without = TEMPLATE_LESSON.replace(marker, "");
            assert!(
                !has_template(&without, &markers),
                "template detected without {:?}",
                marker
            );
        }
    }

    #[test]
    fn test_additional_sections_accepts_both_forms() {
        let markers = Markers::default();
        let content = "## 📚 Дополнительная информация\n\n## Дополнительная информация\n### Дополнительная информация\n";
        let found = additional_sections(content, &markers);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 1);
        assert_eq!(found[1].line, 3);
        assert_eq!(found[1].slug, "дополнительная-информация-1");
    }

    #[test]
    fn test_section_status() {
        let markers = Markers::default();
        assert_eq!(
            section_status("# Урок\n", &markers),
            SectionStatus::Missing
        );
        assert_eq!(
            section_status(TEMPLATE_LESSON, &markers),
            SectionStatus::Template
        );
        assert_eq!(
            section_status(
                "## Дополнительная информация\n\nЭтот раздел будет позже.\n",
                &markers
            ),
            SectionStatus::Stub
        );
        assert_eq!(
            section_status("## 📚 Дополнительная информация\n\n- PEP 8\n", &markers),
            SectionStatus::Filled
        );
    }

    #[test]
    fn test_section_in_code_block_does_not_count() {
        let markers = Markers::default();
        let content = "```\n## Дополнительная информация\n```\n";
        assert_eq!(section_status(content, &markers), SectionStatus::Missing);
    }

    #[test]
    fn test_strip_template() {
        let markers = Markers::default();
        let stripped = strip_template(TEMPLATE_LESSON, &markers).unwrap();
        assert_eq!(
            stripped,
            "# 14. Словари\n\nОсновной текст.\n\n## 📚 Дополнительная информация\n\n\
_Этот раздел будет дополнен практическими примерами и дополнительной информацией._\n"
        );
        assert!(!has_template(&stripped, &markers));
        assert_eq!(section_status(&stripped, &markers), SectionStatus::Stub);
        assert!(strip_template(&stripped, &markers).is_none());
    }

    #[test]
    fn test_strip_template_needs_section_heading() {
        let markers = Markers::default();
        let content = TEMPLATE_LESSON.replace("## 📚 Дополнительная информация", "## Примеры");
        assert!(strip_template(&content, &markers).is_none());
    }

    #[test]
    fn test_remove_legacy_links() {
        let content = "- [[#Циклы]](#циклы)\n\
**[Дополнительная информация](#дополнительная-информация)**\n\
**[[#Дополнительная информация]](#дополнительная-информация)**\n\
**[[#📚 Дополнительная информация]](#дополнительная-информация)**\n";
        let cleaned = remove_legacy_links(content);
        assert_eq!(
            cleaned,
            "- [[#Циклы]](#циклы)\n**[[#📚 Дополнительная информация]](#дополнительная-информация)**\n"
        );
        assert_eq!(remove_legacy_links(&cleaned), cleaned);
    }
}
