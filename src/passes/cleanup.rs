//! Cleanup passes - rewrite lessons in place

use anyhow::Result;
use serde_json::json;

use crate::core::model::{Pass, ResultItem, ResultSet};
use crate::lessons::sections::{remove_legacy_links, strip_template};
use crate::passes::{rewrite_lessons, PassContext};

fn finish(ctx: &PassContext, pass: Pass, mut result_set: ResultSet, checked: usize, changed: usize) -> ResultSet {
    let message = if changed == 0 {
        "No files needed fixing".to_string()
    } else if ctx.dry_run {
        format!("Would fix {} of {} files", changed, checked)
    } else {
        format!("Fixed {} of {} files", changed, checked)
    };
    ctx.report(&message);
    result_set.push(ResultItem::summary(pass, message).with_data(json!({
        "checked": checked,
        "modified": changed,
        "dry_run": ctx.dry_run,
    })));
    result_set
}

/// Remove legacy bold links to the section
pub fn dedupe_nav(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let (result_set, changed) = rewrite_lessons(ctx, &lessons, Pass::DedupeNav, |_, text| {
        (remove_legacy_links(text), Vec::new())
    })?;
    Ok(finish(ctx, Pass::DedupeNav, result_set, lessons.len(), changed))
}

/// Replace placeholder templates with the short stub
pub fn strip_templates(ctx: &PassContext, from: u64) -> Result<ResultSet> {
    let lessons = ctx.lessons(from)?;
    let (result_set, changed) = rewrite_lessons(ctx, &lessons, Pass::StripTemplates, |lesson, text| {
        match strip_template(text, &ctx.markers) {
            Some(stripped) => (stripped, Vec::new()),
            None => {
                ctx.debug(&format!("no template: {}", lesson.name));
                (text.to_string(), Vec::new())
            }
        }
    })?;
    Ok(finish(ctx, Pass::StripTemplates, result_set, lessons.len(), changed))
}

pub fn run_dedupe_nav(ctx: &PassContext, from: u64) -> Result<()> {
    ctx.emit(&dedupe_nav(ctx, from)?)
}

pub fn run_strip_templates(ctx: &PassContext, from: u64) -> Result<()> {
    ctx.emit(&strip_templates(ctx, from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use crate::core::render::{OutputFormat, RenderConfig};
    use crate::lessons::markers::Markers;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn ctx(root: &Path) -> PassContext {
        let mut ctx = PassContext::new(root, RenderConfig::new(OutputFormat::Jsonl));
        ctx.quiet = true;
        ctx
    }

    #[test]
    fn test_dedupe_nav_from_nine() {
        let temp = tempdir().unwrap();
        let legacy = "- [[#A]](#a)\n**[Дополнительная информация](#дополнительная-информация)**\n---\n";
        fs::write(temp.path().join("8 a.md"), legacy).unwrap();
        fs::write(temp.path().join("9 b.md"), legacy).unwrap();

        let set = dedupe_nav(&ctx(temp.path()), 9).unwrap();
        assert_eq!(set.count_kind(Kind::Change), 1);
        assert_eq!(fs::read_to_string(temp.path().join("8 a.md")).unwrap(), legacy);
        assert_eq!(
            fs::read_to_string(temp.path().join("9 b.md")).unwrap(),
            "- [[#A]](#a)\n---\n"
        );

        let again = dedupe_nav(&ctx(temp.path()), 9).unwrap();
        assert_eq!(again.count_kind(Kind::Change), 0);
        assert_eq!(
            again.items.last().unwrap().excerpt.as_deref(),
            Some("No files needed fixing")
        );
    }

    #[test]
    fn test_strip_templates() {
        let temp = tempdir().unwrap();
        let markers = Markers::default();
        let content = format!(
            "# Урок\n\n## 📚 Дополнительная информация\n\n```python\n{}\n```\n",
            markers.template.join("\npass\n")
        );
        let path = temp.path().join("14 x.md");
        fs::write(&path, &content).unwrap();
        fs::write(temp.path().join("15 y.md"), "# Готово\n").unwrap();

        let set = strip_templates(&ctx(temp.path()), 0).unwrap();
        assert_eq!(set.count_kind(Kind::Change), 1);

        let stripped = fs::read_to_string(&path).unwrap();
        assert_eq!(
            stripped,
            format!(
                "# Урок\n\n{}\n\n{}\n",
                markers.section_heading, markers.stub_placeholder
            )
        );
    }
}
