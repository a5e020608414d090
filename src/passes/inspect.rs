//! Inspection helpers - slug a title, list a lesson's headings

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

use crate::core::model::{Pass, ResultItem, ResultSet};
use crate::core::paths::{make_relative, resolve};
use crate::core::util::read_text;
use crate::lessons::headings::scan_headings;
use crate::lessons::slug::slug;
use crate::passes::PassContext;

/// Slug a heading title
pub fn slug_item(text: &str) -> ResultItem {
    let anchor = slug(text);
    ResultItem::summary(Pass::Inspect, anchor.clone()).with_data(json!({
        "text": text,
        "slug": anchor,
    }))
}

/// List the headings of one file
pub fn headings(ctx: &PassContext, file: &Path) -> Result<ResultSet> {
    let full_path = resolve(ctx.root(), file);
    let relative =
        make_relative(&full_path, ctx.root()).unwrap_or_else(|| file.display().to_string());

    let content = read_text(&full_path)
        .with_context(|| format!("cannot list headings of {}", relative))?;

    Ok(scan_headings(&content)
        .into_iter()
        .map(|h| {
            ResultItem::heading(relative.clone(), h.line, h.title).with_data(json!({
                "level": h.level,
                "slug": h.slug,
            }))
        })
        .collect())
}

pub fn run_slug(ctx: &PassContext, text: &str) -> Result<()> {
    let mut result_set = ResultSet::new();
    result_set.push(slug_item(text));
    ctx.emit(&result_set)
}

pub fn run_headings(ctx: &PassContext, file: &Path) -> Result<()> {
    ctx.emit(&headings(ctx, file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use crate::core::render::{OutputFormat, RenderConfig};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_slug_item() {
        let item = slug_item("##例 Title!");
        assert_eq!(item.excerpt.as_deref(), Some("例-title"));
        assert_eq!(item.data.unwrap()["slug"], "例-title");
    }

    #[test]
    fn test_headings_lists_levels_and_slugs() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("3 Циклы.md"), "# Циклы\n\n## Цикл for\n").unwrap();

        let ctx = PassContext::new(temp.path(), RenderConfig::new(OutputFormat::Jsonl));
        let set = headings(&ctx, Path::new("3 Циклы.md")).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.items.iter().all(|i| i.kind == Kind::Heading));
        let second = &set.items[1];
        assert_eq!(second.path.as_deref(), Some("3 Циклы.md"));
        assert_eq!(second.range.map(|r| r.start), Some(3));
        assert_eq!(second.data.as_ref().unwrap()["level"], 2);
        assert_eq!(second.data.as_ref().unwrap()["slug"], "цикл-for");
    }

    #[test]
    fn test_headings_missing_file() {
        let temp = tempdir().unwrap();
        let ctx = PassContext::new(temp.path(), RenderConfig::new(OutputFormat::Jsonl));
        let err = headings(&ctx, Path::new("404.md")).unwrap_err();
        assert!(err.to_string().contains("404.md"));
    }
}
