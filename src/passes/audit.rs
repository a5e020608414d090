//! Section audits - read-only reports on the "Additional information" section

use anyhow::Result;
use serde_json::json;

use crate::core::model::{Finding, Pass, ResultItem, ResultSet, Severity};
use crate::core::util::read_text;
use crate::lessons::sections::{additional_sections, has_stub};
use crate::passes::PassContext;

/// Which lessons have the section and which lack it
pub fn sections(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let mut result_set = ResultSet::new();
    let mut present = 0;

    for lesson in &lessons {
        let content = read_text(&lesson.path)?;
        let found = additional_sections(&content, &ctx.markers);
        let has_section = !found.is_empty();

        let mut item = ResultItem::lesson(lesson.name.clone(), Pass::Sections).with_data(json!({
            "lesson": lesson.number,
            "has_section": has_section,
        }));
        if let Some(first) = found.first() {
            item = item.at_line(first.line);
            present += 1;
        } else {
            item.severity = Severity::Warning;
            item.findings.push(Finding::new(
                "MISSING_SECTION",
                format!("no \"{}\" section", ctx.markers.additional_title),
            ));
        }
        result_set.push(item);
    }

    let missing = lessons.len() - present;
    let message = format!("✅ with section: {}, ❌ without section: {}", present, missing);
    result_set.push(
        ResultItem::summary(Pass::Sections, message.clone()).with_data(json!({
            "with_section": present,
            "without_section": missing,
        })),
    );
    ctx.report(&message);

    Ok(result_set)
}

/// Lessons whose section heading appears more than once
pub fn duplicates(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let mut result_set = ResultSet::new();

    for lesson in &lessons {
        let content = read_text(&lesson.path)?;
        let found = additional_sections(&content, &ctx.markers);
        if found.len() < 2 {
            continue;
        }

        let lines: Vec<u32> = found.iter().map(|h| h.line).collect();
        let message = format!("section appears {} times", found.len());
        result_set.push(
            ResultItem::issue(
                lesson.name.clone(),
                Severity::Warning,
                Finding::new("DUPLICATE_SECTION", message),
                Pass::Duplicates,
            )
            .at_line(lines[1])
            .with_data(json!({
                "lesson": lesson.number,
                "count": found.len(),
                "lines": lines,
            })),
        );
    }

    let count = result_set.len();
    let message = if count == 0 {
        "No duplicates found".to_string()
    } else {
        format!("{} lesson(s) with duplicate sections", count)
    };
    result_set.push(
        ResultItem::summary(Pass::Duplicates, message.clone())
            .with_data(json!({ "checked": lessons.len(), "with_duplicates": count })),
    );
    ctx.report(&message);

    Ok(result_set)
}

/// Lessons whose section exists but is still a "to be written" stub
pub fn stubs(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let mut result_set = ResultSet::new();

    for lesson in &lessons {
        let content = read_text(&lesson.path)?;
        let found = additional_sections(&content, &ctx.markers);
        let Some(section) = found.first() else {
            continue;
        };
        if !has_stub(&content, &ctx.markers) {
            continue;
        }

        result_set.push(
            ResultItem::lesson(lesson.name.clone(), Pass::Stubs)
                .at_line(section.line)
                .with_data(json!({ "lesson": lesson.number })),
        );
    }

    let message = format!("lessons with stub ({})", result_set.len());
    let count = result_set.len();
    result_set.push(
        ResultItem::summary(Pass::Stubs, message.clone())
            .with_data(json!({ "checked": lessons.len(), "stubs": count })),
    );
    ctx.report(&message);

    Ok(result_set)
}

pub fn run_sections(ctx: &PassContext, from: u64) -> Result<()> {
    ctx.emit(&sections(ctx, from)?)
}

pub fn run_duplicates(ctx: &PassContext, from: u64) -> Result<()> {
    ctx.emit(&duplicates(ctx, from)?)
}

pub fn run_stubs(ctx: &PassContext, from: u64) -> Result<()> {
    ctx.emit(&stubs(ctx, from)?)
}
