//! Report assembly and rendering.

mod assembler;
mod grouping;
mod renderer;

pub use assembler::{assemble, enrich, AssembledReport};
pub use grouping::{group_by_project, EnrichedIssue, GroupedIssues, ProjectGroup};
pub use renderer::{render_free_text_section, render_section};

use std::fmt;

/// Title of the section listing open issues due this week or overdue.
pub const DUE_THIS_WEEK_TITLE: &str = "Issues to close this week:";

/// Heading of the free-text difficulties section.
pub const DIFFICULTIES_HEADING: &str = "Main difficulties:";

/// Title of the closed-issues section for a look-back of `weeks`.
#[must_use]
pub fn closed_section_title(weeks: u32) -> String {
    if weeks <= 1 {
        "Issues closed last week:".to_string()
    } else {
        format!("Issues closed in the last {weeks} weeks:")
    }
}

/// Rendered report body: the non-empty sections, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<String>,
}

impl Report {
    /// Appends a rendered section; empty sections are dropped.
    pub fn push_section(&mut self, section: String) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Returns the non-empty sections in report order.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Returns true if no section has content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the full body text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.sections.concat()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.sections.iter().try_for_each(|section| f.write_str(section))
    }
}
