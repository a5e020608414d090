//! Unified Result Model
//!
//! Every pass maps what it found or changed to this model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Lesson,
    Heading,
    Issue,
    Change,
    Summary,
}

/// Severity of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// The pass that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pass {
    Nav,
    Check,
    Sections,
    Duplicates,
    Stubs,
    DedupeNav,
    StripTemplates,
    Inspect,
}

/// Line-based range (1-indexed, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeLine {
    pub start: u32,
    pub end: u32,
}

impl RangeLine {
    pub fn line(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content hash (XXH3) of the text as it stands after the pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Whether the pass modified (or, on dry runs, would modify) the file
    #[serde(default)]
    pub changed: bool,
}

/// A single problem or observation attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub code: String,
    pub message: String,
}

impl Finding {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all passes produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Line range within the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeLine>,

    /// Human-readable excerpt (a heading title, a link line, a message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (lesson number, anchor, counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    pub severity: Severity,

    pub pass: Pass,

    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

impl ResultItem {
    fn base(kind: Kind, pass: Pass) -> Self {
        Self {
            kind,
            path: None,
            range: None,
            excerpt: None,
            data: None,
            severity: Severity::Info,
            pass,
            meta: Meta::default(),
            findings: Vec::new(),
        }
    }

    /// Create a lesson-level result
    pub fn lesson(path: impl Into<String>, pass: Pass) -> Self {
        let mut item = Self::base(Kind::Lesson, pass);
        item.path = Some(path.into());
        item
    }

    /// Create a heading result
    pub fn heading(path: impl Into<String>, line: u32, title: impl Into<String>) -> Self {
        let mut item = Self::base(Kind::Heading, Pass::Inspect);
        item.path = Some(path.into());
        item.range = Some(RangeLine::line(line));
        item.excerpt = Some(title.into());
        item
    }

    /// Create an issue result carrying a single finding
    pub fn issue(path: impl Into<String>, severity: Severity, finding: Finding, pass: Pass) -> Self {
        let mut item = Self::base(Kind::Issue, pass);
        item.path = Some(path.into());
        item.excerpt = Some(finding.message.clone());
        item.severity = severity;
        item.findings.push(finding);
        item
    }

    /// Create a change result for a rewritten file
    pub fn change(path: impl Into<String>, pass: Pass) -> Self {
        let mut item = Self::base(Kind::Change, pass);
        item.path = Some(path.into());
        item.meta.changed = true;
        item
    }

    /// Create an end-of-pass summary
    pub fn summary(pass: Pass, message: impl Into<String>) -> Self {
        let mut item = Self::base(Kind::Summary, pass);
        item.excerpt = Some(message.into());
        item
    }

    /// Set the line range
    pub fn at_line(mut self, line: u32) -> Self {
        self.range = Some(RangeLine::line(line));
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items of the given kind
    #[allow(dead_code)]
    pub fn count_kind(&self, kind: Kind) -> usize {
        self.items.iter().filter(|i| i.kind == kind).count()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
