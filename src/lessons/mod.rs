//! Lessons module - Markdown lesson structure
//!
//! Lessons are numbered Markdown files. This module knows their headings, anchor
//! slugs, the quick navigation block and the "Additional information" section.

pub mod headings;
pub mod markers;
pub mod nav;
pub mod scan;
pub mod sections;
pub mod slug;
