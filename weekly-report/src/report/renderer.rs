//! Plain-text rendering of report sections.
//!
//! Output uses CRLF line endings so it can go straight into a mail body.
//! Every non-empty section ends with exactly one blank line; empty input
//! renders as an empty string so callers can drop the section.

use super::grouping::{EnrichedIssue, GroupedIssues};
use crate::projects::ProjectNames;
use std::fmt::Write;

const CRLF: &str = "\r\n";

/// Renders a titled section listing issues per project.
///
/// ```text
/// Issues closed last week:
///
/// * Backend:
///     * [Fix login](https://git.example.com/backend/-/issues/3)
///         * Due date: 2024-05-03
///         * Merge request: [Fix login](https://git.example.com/backend/-/merge_requests/9)
/// ```
/// (indentation is a tab per level)
#[must_use]
pub fn render_section(
    title: &str,
    grouped: &GroupedIssues<EnrichedIssue>,
    names: &ProjectNames,
) -> String {
    if grouped.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(title);
    out.push_str(CRLF);
    out.push_str(CRLF);

    for group in grouped {
        let _ = write!(out, "* {}:{CRLF}", names.name_of(group.project_id));
        for entry in &group.entries {
            render_entry(&mut out, entry);
        }
    }

    out.push_str(CRLF);
    out
}

fn render_entry(out: &mut String, entry: &EnrichedIssue) {
    let issue = &entry.issue;
    let _ = write!(out, "\t* [{}]({}){CRLF}", issue.title, issue.web_url);

    if let Some(due_date) = issue.due_date {
        let _ = write!(out, "\t\t* Due date: {}{CRLF}", due_date.format("%Y-%m-%d"));
    }

    if let Some(mr) = &entry.merge_request {
        let _ = write!(out, "\t\t* Merge request: [{}]({}){CRLF}", mr.title, mr.web_url);
    }
}

/// Renders a heading followed by one bullet per non-blank line.
///
/// Returns an empty string when every line is blank.
#[must_use]
pub fn render_free_text_section<S: AsRef<str>>(heading: &str, lines: &[S]) -> String {
    let bullets: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim_end())
        .filter(|line| !line.trim().is_empty())
        .collect();

    if bullets.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(heading);
    out.push_str(CRLF);
    for bullet in bullets {
        let _ = write!(out, "\t* {bullet}{CRLF}");
    }
    out.push_str(CRLF);
    out
}
