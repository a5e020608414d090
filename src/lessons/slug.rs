//! Anchor slug derivation
//!
//! Turns heading text into the anchor id a Markdown renderer would link to.
//! Every pass that compares anchors goes through [`slug`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Emphasis markup characters dropped before anything else
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[`*_~]").expect("Invalid EMPHASIS_RE"));

/// Anything that is not a word character, whitespace or '-'.
/// Variation selectors and ZWJ count as marks for `\w`, so they are listed explicitly.
static INVALID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s-]|[\x{FE00}-\x{FE0F}\x{200D}]").expect("Invalid INVALID_RE")
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RE"));

static DASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("Invalid DASHES_RE"));

/// Derive the anchor slug for a heading title
pub fn slug(title: &str) -> String {
    let text = EMPHASIS_RE.replace_all(title.trim(), "");
    let text = text.to_lowercase();
    let text = INVALID_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, "-");
    let text = DASHES_RE.replace_all(&text, "-");
    text.trim_matches('-').to_string()
}

/// Hands out document-unique anchors.
///
/// The first heading with a given slug keeps it; repeats get `-1`, `-2`, ...
/// A suffixed candidate already taken by another heading is skipped.
#[derive(Debug, Default)]
pub struct Anchors {
    used: HashSet<String>,
    repeats: HashMap<String, usize>,
}

impl Anchors {
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let counter = self.repeats.entry(base.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}-{}", base, counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_strips_markers_and_punctuation() {
        assert_eq!(slug("##例 Title!"), "例-title");
    }

    #[test]
    fn test_slug_is_stable_across_runs() {
        let first = slug("##例 Title!");
        for _ in 0..3 {
            assert_eq!(slug("##例 Title!"), first);
        }
    }

    #[test]
    fn test_slug_cyrillic() {
        assert_eq!(slug("Основы синтаксиса"), "основы-синтаксиса");
        assert_eq!(slug("ЦИКЛЫ и Условия"), "циклы-и-условия");
    }

    #[test]
    fn test_slug_drops_emoji_prefix() {
        assert_eq!(
            slug("📚 Дополнительная информация"),
            "дополнительная-информация"
        );
        assert_eq!(slug("📖 Быстрая навигация"), "быстрая-навигация");
        assert_eq!(slug("⚠️ Важно"), "важно");
    }

    #[test]
    fn test_slug_strips_emphasis() {
        assert_eq!(slug("**Bold** and `code`"), "bold-and-code");
        assert_eq!(slug("snake_case ~strike~"), "snakecase-strike");
    }

    #[test]
    fn test_slug_collapses_separators() {
        assert_eq!(slug("a  -  b"), "a-b");
        assert_eq!(slug("Функции: (def) и return"), "функции-def-и-return");
        assert_eq!(slug("  --Edge--  "), "edge");
    }

    #[test]
    fn test_slug_keeps_digits() {
        assert_eq!(slug("Шаг 1. Установка Python 3.12"), "шаг-1-установка-python-312");
    }

    #[test]
    fn test_anchors_suffix_repeats() {
        let mut anchors = Anchors::default();
        assert_eq!(anchors.claim("пример"), "пример");
        assert_eq!(anchors.claim("списки"), "списки");
        assert_eq!(anchors.claim("пример"), "пример-1");
        assert_eq!(anchors.claim("пример"), "пример-2");
    }

    #[test]
    fn test_anchors_skip_taken_suffix() {
        let mut anchors = Anchors::default();
        assert_eq!(anchors.claim("шаг-1"), "шаг-1");
        assert_eq!(anchors.claim("шаг"), "шаг");
        assert_eq!(anchors.claim("шаг"), "шаг-2");
        assert_eq!(anchors.claim("шаг-1"), "шаг-1-1");
    }

    #[test]
    fn test_slug_empty_and_symbol_only() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("!!! ???"), "");
    }
}
