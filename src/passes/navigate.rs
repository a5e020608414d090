//! Navigation pass - regenerate the quick navigation block of each lesson

use anyhow::Result;

use crate::core::model::{Finding, Pass, ResultItem, ResultSet, Severity};
use crate::lessons::nav::rebuild_nav;
use crate::passes::{rewrite_lessons, PassContext};

/// Rebuild navigation blocks in lessons numbered `from` or higher
pub fn navigate(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let mut blocks = 0;

    let (mut result_set, changed) = rewrite_lessons(ctx, &lessons, Pass::Nav, |lesson, text| {
        let rebuilt = rebuild_nav(text, &ctx.markers);
        blocks += rebuilt.blocks;
        let issues = rebuilt
            .unterminated
            .iter()
            .map(|&line| {
                ResultItem::issue(
                    lesson.name.clone(),
                    Severity::Warning,
                    Finding::new(
                        "NAV_UNTERMINATED",
                        "navigation block has no closing '---'; left as is",
                    ),
                    Pass::Nav,
                )
                .at_line(line)
            })
            .collect();
        (rebuilt.text, issues)
    })?;

    let verb = if ctx.dry_run { "would modify" } else { "modified" };
    let message = format!("done. {} {} of {} files", verb, changed, lessons.len());
    result_set.push(
        ResultItem::summary(Pass::Nav, message.clone()).with_data(serde_json::json!({
            "checked": lessons.len(),
            "modified": changed,
            "blocks": blocks,
            "dry_run": ctx.dry_run,
        })),
    );
    ctx.report(&message);

    Ok(result_set)
}

/// Run the nav command
pub fn run_nav(ctx: &PassContext, from: u64) -> Result<()> {
    let result_set = navigate(ctx, from)?;
    ctx.emit(&result_set)
}
