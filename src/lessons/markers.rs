//! Fixed text markers used by the lesson passes
//!
//! Lessons are written in Russian; these are matched literally.

/// Heading that opens the quick navigation block
pub const NAV_HEADING: &str = "## 📖 Быстрая навигация";

/// Titles starting with this are never listed in the navigation block
pub const NAV_SKIP_PREFIX: &str = "📖";

/// Line prefix that closes the navigation block
pub const NAV_DELIMITER: &str = "---";

/// Bold link prefix that ended hand-written navigation blocks
pub const LEGACY_NAV_END: &str = "**[📚";

/// Marker configuration for section checks and rewrites
#[derive(Debug, Clone)]
pub struct Markers {
    /// Title of the "Additional information" section (compared by slug)
    pub additional_title: &'static str,

    /// Exact heading line that `strip-templates` rewrites
    pub section_heading: &'static str,

    /// All of these must be present for a section to be the boilerplate template
    pub template: Vec<&'static str>,

    /// Any of these marks a section as a "to be written" stub
    pub stub: Vec<&'static str>,

    /// Line that replaces a stripped template
    pub stub_placeholder: &'static str,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            additional_title: "Дополнительная информация",
            section_heading: "## 📚 Дополнительная информация",
            template: vec![
                "# Пример кода, демонстрирующий основные концепции",
                "# из этого урока",
                "# Более сложный пример с комбинированием",
            ],
            stub: vec!["будет дополнен", "Этот раздел будет"],
            stub_placeholder:
                "_Этот раздел будет дополнен практическими примерами и дополнительной информацией._",
        }
    }
}
