//! Pipeline orchestration: fetch, group, correlate.

use super::grouping::{group_by_project, EnrichedIssue, GroupedIssues, ProjectGroup};
use super::renderer::{render_free_text_section, render_section};
use super::{closed_section_title, Report, DIFFICULTIES_HEADING, DUE_THIS_WEEK_TITLE};
use crate::context::ReportContext;
use crate::gitlab::{GitLabApi, Issue, UpstreamError};
use crate::issues::{fetch_closed, fetch_due_this_week};
use crate::merge_requests::find_latest;
use crate::projects::{resolve_names, ProjectNames};
use tracing::{info, info_span, Instrument};

/// Everything needed to render the issue sections of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledReport {
    /// Closed issues, grouped and correlated.
    pub closed: GroupedIssues<EnrichedIssue>,

    /// Open issues due this week or overdue, grouped and correlated.
    pub due_this_week: GroupedIssues<EnrichedIssue>,

    /// Names of the projects referenced above. Empty when both sections are.
    pub project_names: ProjectNames,

    lookback_weeks: u32,
}

impl AssembledReport {
    /// Returns the number of issues with a correlated merge request.
    #[must_use]
    pub fn linked_merge_requests(&self) -> usize {
        self.closed
            .iter()
            .chain(self.due_this_week.iter())
            .flat_map(|group| &group.entries)
            .filter(|entry| entry.merge_request.is_some())
            .count()
    }

    /// Returns true if neither issue section has content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty() && self.due_this_week.is_empty()
    }

    /// Renders the report: closed issues, issues due this week, then the
    /// free-text difficulties. Empty sections are omitted.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, difficulties: &[S]) -> Report {
        let mut report = Report::default();
        report.push_section(render_section(
            &closed_section_title(self.lookback_weeks),
            &self.closed,
            &self.project_names,
        ));
        report.push_section(render_section(
            DUE_THIS_WEEK_TITLE,
            &self.due_this_week,
            &self.project_names,
        ));
        report.push_section(render_free_text_section(DIFFICULTIES_HEADING, difficulties));
        report
    }
}

/// Fetches both issue sections, groups them by project and correlates every
/// issue with a merge request.
///
/// Requests are issued one at a time. Project names are resolved once, and
/// only if at least one section has issues.
///
/// # Errors
///
/// Returns the first [`UpstreamError`] encountered; nothing is assembled in
/// that case.
pub async fn assemble<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
) -> Result<AssembledReport, UpstreamError> {
    let span = info_span!("assemble_report", assignee = %ctx.assignee());

    async {
        let closed = fetch_closed(ctx, ctx.lookback_weeks()).await?;
        let closed = enrich(ctx, group_by_project(closed)).await?;

        let due_this_week = fetch_due_this_week(ctx).await?;
        let due_this_week = enrich(ctx, group_by_project(due_this_week)).await?;

        let project_names = if closed.is_empty() && due_this_week.is_empty() {
            info!("No issues to report");
            ProjectNames::default()
        } else {
            resolve_names(ctx).await?
        };

        Ok(AssembledReport {
            closed,
            due_this_week,
            project_names,
            lookback_weeks: ctx.lookback_weeks(),
        })
    }
    .instrument(span)
    .await
}

/// Attaches the latest matching merge request to every issue, in group order.
///
/// # Errors
///
/// Returns [`UpstreamError`] if any merge request lookup fails.
pub async fn enrich<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
    grouped: GroupedIssues<Issue>,
) -> Result<GroupedIssues<EnrichedIssue>, UpstreamError> {
    if grouped.is_empty() {
        return Ok(GroupedIssues::default());
    }

    let mut groups = Vec::with_capacity(grouped.project_count());
    for group in grouped {
        let mut entries = Vec::with_capacity(group.entries.len());
        for issue in group.entries {
            let merge_request = find_latest(ctx, &issue).await?;
            entries.push(EnrichedIssue {
                issue,
                merge_request,
            });
        }
        groups.push(ProjectGroup {
            project_id: group.project_id,
            entries,
        });
    }

    Ok(groups.into_iter().collect())
}
