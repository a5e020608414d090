//! Lesson check - navigation links and section health
//!
//! Checks for:
//! - navigation links whose anchor matches no heading
//! - navigation blocks without a closing delimiter
//! - a missing or still-templated "Additional information" section

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::core::error::LessonError;
use crate::core::model::{Finding, Pass, ResultItem, ResultSet, Severity};
use crate::core::util::{read_text, text_meta};
use crate::lessons::headings::HeadingIndex;
use crate::lessons::markers::Markers;
use crate::lessons::nav::scan_links;
use crate::lessons::sections::{section_status, SectionStatus};
use crate::passes::PassContext;

/// Findings for a single lesson
#[derive(Debug, Clone)]
pub struct LessonReport {
    pub name: String,
    pub nav_links: usize,
    pub headings: usize,
    pub section: SectionStatus,
    pub issues: Vec<ResultItem>,
}

impl LessonReport {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

fn issue(name: &str, severity: Severity, code: &str, message: String, line: Option<u32>) -> ResultItem {
    let item = ResultItem::issue(name, severity, Finding::new(code, message), Pass::Check);
    match line {
        Some(line) => item.at_line(line),
        None => item,
    }
}

/// Check one lesson's content
pub fn check_lesson(name: &str, content: &str, markers: &Markers) -> LessonReport {
    let index = HeadingIndex::from_content(content);
    let nav = scan_links(content);
    let mut issues = Vec::new();

    if let (Some(line), false) = (nav.heading_line, nav.terminated) {
        issues.push(issue(
            name,
            Severity::Warning,
            "NAV_UNTERMINATED",
            "navigation block has no closing '---'".to_string(),
            Some(line),
        ));
    }

    for link in &nav.links {
        if index.resolve(&link.anchor).is_some() {
            continue;
        }
        issues.push(
            issue(
                name,
                Severity::Error,
                "BROKEN_LINK",
                format!("#{} -> heading not found", link.anchor),
                Some(link.line),
            )
            .with_data(json!({ "anchor": link.anchor, "link": link.text })),
        );
    }

    let section = section_status(content, markers);
    match section {
        SectionStatus::Missing => issues.push(issue(
            name,
            Severity::Warning,
            "MISSING_SECTION",
            format!("\"{}\" section is missing", markers.additional_title),
            None,
        )),
        SectionStatus::Template => issues.push(issue(
            name,
            Severity::Warning,
            "TEMPLATE_SECTION",
            format!("\"{}\" section is the placeholder template", markers.additional_title),
            None,
        )),
        SectionStatus::Stub | SectionStatus::Filled => {}
    }

    LessonReport {
        name: name.to_string(),
        nav_links: nav.links.len(),
        headings: index.len(),
        section,
        issues,
    }
}

/// Check lessons numbered `from` or higher
pub fn check(ctx: &PassContext, from: u64) -> Result<(ResultSet, usize)> {
    let lessons = ctx.lessons(from)?;
    let mut result_set = ResultSet::new();
    let mut with_issues = Vec::new();
    let mut with_templates = Vec::new();

    for lesson in &lessons {
        let content = read_text(&lesson.path)?;
        let report = check_lesson(&lesson.name, &content, &ctx.markers);

        if report.has_issues() {
            with_issues.push(report.name.clone());
        }
        if report.section == SectionStatus::Template {
            with_templates.push(report.name.clone());
        }

        let issue_count = report.issues.len();
        result_set.extend(report.issues);
        let severity = if issue_count > 0 {
            Severity::Warning
        } else {
            Severity::Info
        };
        let mut item = ResultItem::lesson(lesson.name.clone(), Pass::Check)
            .with_meta(text_meta(&content, false))
            .with_data(json!({
                "lesson": lesson.number,
                "nav_links": report.nav_links,
                "headings": report.headings,
                "section": report.section,
                "issues": issue_count,
            }));
        item.severity = severity;
        result_set.push(item);
    }

    let clean = lessons.len() - with_issues.len();
    let message = format!(
        "checked {} lessons: {} clean, {} with issues, {} with template",
        lessons.len(),
        clean,
        with_issues.len(),
        with_templates.len()
    );
    result_set.push(
        ResultItem::summary(Pass::Check, message.clone()).with_data(json!({
            "checked": lessons.len(),
            "clean": clean,
            "with_issues": with_issues.len(),
            "with_templates": with_templates.len(),
            "template_files": with_templates,
        })),
    );

    ctx.report(&message);
    if !ctx.quiet {
        for name in &with_templates {
            eprintln!("  {} {}", "⚠".yellow(), name);
        }
        if with_issues.is_empty() {
            eprintln!("{}", "✅ all lessons are fine".green());
        }
    }

    Ok((result_set, with_issues.len()))
}

/// Run the check command
pub fn run_check(ctx: &PassContext, from: u64, strict: bool) -> Result<()> {
    let (result_set, with_issues) = check(ctx, from)?;
    ctx.emit(&result_set)?;

    if strict && with_issues > 0 {
        return Err(LessonError::StrictCheckFailed { count: with_issues }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(report: &LessonReport) -> Vec<&str> {
        report
            .issues
            .iter()
            .map(|i| i.findings[0].code.as_str())
            .collect()
    }

    #[test]
    fn test_clean_lesson() {
        let content = "## 📖 Быстрая навигация\n\n- [[#Списки]](#списки)\n\n\
**[[#📚 Дополнительная информация]](#дополнительная-информация)**\n\n---\n\n\
## Списки\n\n## 📚 Дополнительная информация\n\n- docs.python.org\n";
        let report = check_lesson("6 Списки.md", content, &Markers::default());
        assert!(!report.has_issues(), "{:?}", codes(&report));
        assert_eq!(report.nav_links, 2);
        assert_eq!(report.section, SectionStatus::Filled);
    }

    #[test]
    fn test_broken_link_and_repeated_titles() {
        let content = "## 📖 Быстрая навигация\n\
- [Кортежи](#кортежи)\n\
- [Пример](#пример)\n\
- [Ещё пример](#пример-1)\n\
---\n\
## Пример\n\
### Пример\n\
## Дополнительная информация\n\
Этот раздел будет дополнен.\n";
        let report = check_lesson("7 Кортежи.md", content, &Markers::default());
        assert_eq!(codes(&report), vec!["BROKEN_LINK"]);

        let broken = &report.issues[0];
        assert_eq!(broken.severity, Severity::Error);
        assert_eq!(broken.range.map(|r| r.start), Some(2));
        assert_eq!(
            broken.excerpt.as_deref(),
            Some("#кортежи -> heading not found")
        );
        assert_eq!(report.section, SectionStatus::Stub);
    }

    #[test]
    fn test_rebuilt_nav_with_repeated_titles_checks_clean() {
        let markers = Markers::default();
        let content = "## 📖 Быстрая навигация\n\n---\n\n## Списки\n### Пример\n## Кортежи\n### Пример\n## Пример\n\n## 📚 Дополнительная информация\n\n- docs.python.org\n";
        let rebuilt = crate::lessons::nav::rebuild_nav(content, &markers).text;
        let report = check_lesson("8 Списки.md", &rebuilt, &markers);
        assert!(!report.has_issues(), "{:?}", codes(&report));
        assert_eq!(report.nav_links, 4);
    }

    #[test]
    fn test_missing_and_template_sections() {
        let markers = Markers::default();
        let missing = check_lesson("1 a.md", "# Урок\n", &markers);
        assert_eq!(codes(&missing), vec!["MISSING_SECTION"]);

        let template = format!(
            "## 📚 Дополнительная информация\n\n{}\n",
            markers.template.join("\n")
        );
        let report = check_lesson("2 b.md", &template, &markers);
        assert_eq!(codes(&report), vec!["TEMPLATE_SECTION"]);
    }

    #[test]
    fn test_unterminated_nav_block() {
        let content = "## 📖 Быстрая навигация\n- [A](#a)\n## A\n## Дополнительная информация\nтекст\n";
        let report = check_lesson("3 c.md", content, &Markers::default());
        assert_eq!(codes(&report), vec!["NAV_UNTERMINATED"]);
        assert_eq!(report.issues[0].range.map(|r| r.start), Some(1));
    }
}
