//! Issue retrieval for the report sections.
//!
//! Closed issues are selected with an absolute `updated_after` timestamp,
//! while issues due this week rely on GitLab's relative `due_date` keywords
//! so no client-side date arithmetic is needed for them.

use crate::context::ReportContext;
use crate::gitlab::{DueDateFilter, GitLabApi, Issue, IssueQuery, IssueState, UpstreamError};
use tracing::{debug, info, info_span, Instrument};

/// Fetches issues assigned to the context's user that were closed within the
/// last `lookback_weeks` weeks.
///
/// Issues that were moved to another issue are dropped: GitLab closes the
/// original when moving, which does not mean the work was done.
///
/// # Errors
///
/// Returns [`UpstreamError`] if GitLab cannot be queried.
pub async fn fetch_closed<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
    lookback_weeks: u32,
) -> Result<Vec<Issue>, UpstreamError> {
    let since = ctx.closed_since(lookback_weeks);
    let span = info_span!("fetch_closed", assignee = %ctx.assignee(), since = %since);

    async {
        let query = IssueQuery::assigned_to(ctx.assignee(), IssueState::Closed).updated_after(since);
        let issues = ctx.api().list_issues(&query).await?;
        let fetched = issues.len();

        let issues = without_moved(issues);
        if issues.len() != fetched {
            debug!(dropped = fetched - issues.len(), "Dropped moved issues");
        }

        info!(count = issues.len(), "Fetched closed issues");
        Ok(issues)
    }
    .instrument(span)
    .await
}

/// Fetches open issues due this week followed by overdue open issues.
///
/// The two result sets are concatenated as-is; an issue reported by GitLab
/// under both filters appears twice.
///
/// # Errors
///
/// Returns [`UpstreamError`] if either query fails.
pub async fn fetch_due_this_week<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
) -> Result<Vec<Issue>, UpstreamError> {
    let span = info_span!("fetch_due_this_week", assignee = %ctx.assignee());

    async {
        let mut issues = fetch_open_due(ctx, DueDateFilter::Week).await?;
        issues.extend(fetch_open_due(ctx, DueDateFilter::Overdue).await?);

        info!(count = issues.len(), "Fetched issues due this week");
        Ok(issues)
    }
    .instrument(span)
    .await
}

async fn fetch_open_due<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
    filter: DueDateFilter,
) -> Result<Vec<Issue>, UpstreamError> {
    let query = IssueQuery::assigned_to(ctx.assignee(), IssueState::Opened).due(filter);
    let issues = ctx.api().list_issues(&query).await?;
    debug!(filter = ?filter, count = issues.len(), "Fetched open issues");
    Ok(issues)
}

/// Removes issues that were moved elsewhere.
fn without_moved(issues: Vec<Issue>) -> Vec<Issue> {
    issues.into_iter().filter(|issue| !issue.is_moved()).collect()
}
