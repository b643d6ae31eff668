//! Run summary types.

use crate::report::AssembledReport;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of closed issues reported.
    pub closed_issues: usize,

    /// Number of open issues due this week or overdue.
    pub due_issues: usize,

    /// Number of distinct projects across both issue sections.
    pub projects: usize,

    /// Number of issues with a correlated merge request.
    pub merge_requests_linked: usize,

    /// Number of difficulty lines entered.
    pub difficulties: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Whether the report was handed to the mail transport.
    pub sent: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with the assembled issue sections.
    pub fn record_report(&mut self, report: &AssembledReport) {
        self.closed_issues = report.closed.entry_count();
        self.due_issues = report.due_this_week.entry_count();
        self.merge_requests_linked = report.linked_merge_requests();

        let mut projects: Vec<u64> = report
            .closed
            .iter()
            .chain(report.due_this_week.iter())
            .map(|group| group.project_id)
            .collect();
        projects.sort_unstable();
        projects.dedup();
        self.projects = projects.len();
    }

    /// Returns true if the report has no issue content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed_issues == 0 && self.due_issues == 0
    }
}
