//! Issue to merge request correlation.
//!
//! Merge requests are linked to issues by naming convention only: a branch
//! created for an issue reuses the issue title, so the two are compared after
//! [`slugify`]. This is a best-effort match, not a guaranteed link.

use crate::context::ReportContext;
use crate::gitlab::{GitLabApi, Issue, MergeRequest, MergeRequestQuery, UpstreamError};
use tracing::{debug, info_span, Instrument};

/// Keeps ASCII letters and digits, lower-cased; drops everything else.
///
/// `slugify("Fix Bug-42!")` is `"fixbug42"`.
#[must_use]
pub fn slugify(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Picks the merge request whose source branch matches `issue_title`.
///
/// When several candidates match, the one listed last wins. GitLab's list
/// order is used as-is, it is not guaranteed to be chronological.
#[must_use]
pub fn select_latest(
    issue_title: &str,
    candidates: impl IntoIterator<Item = MergeRequest>,
) -> Option<MergeRequest> {
    let wanted = slugify(issue_title);
    candidates
        .into_iter()
        .filter(|mr| slugify(&mr.source_branch) == wanted)
        .last()
}

/// Finds the open merge request most plausibly implementing `issue`.
///
/// Candidates are the open merge requests authored by the issue's assignee.
/// Returns `None` when the issue has no assignee or nothing matches.
///
/// # Errors
///
/// Returns [`UpstreamError`] if GitLab cannot be queried.
pub async fn find_latest<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
    issue: &Issue,
) -> Result<Option<MergeRequest>, UpstreamError> {
    let Some(author_id) = issue.assignee_id() else {
        debug!(issue_id = issue.id, "Issue has no assignee, skipping correlation");
        return Ok(None);
    };

    let span = info_span!("find_merge_request", issue_id = issue.id, author_id);

    async {
        let candidates = ctx
            .api()
            .list_merge_requests(&MergeRequestQuery::open_by_author(author_id))
            .await?;
        let total = candidates.len();

        let found = select_latest(&issue.title, candidates);
        debug!(
            candidates = total,
            merge_request_id = found.as_ref().map(|mr| mr.id),
            "Correlated merge request"
        );
        Ok(found)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::MergeRequestState;
    use crate::test_support::{issue, merge_request, Endpoint, FakeGitLab, ASSIGNEE};
    use chrono::Utc;

    #[test]
    fn slugify_strips_punctuation_and_case() {
        assert_eq!(slugify("Fix Bug-42!"), "fixbug42");
        assert_eq!(slugify("Fix Bug-42!"), slugify("fixbug42"));
        assert_eq!(slugify("feature/ÉTÉ_2024"), "featuret2024");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in ["Fix 42", "already-slug", "  ", "Ünïcödé & stuff", "MiXeD_Case.rs"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn select_latest_returns_none_without_match() {
        let candidates = vec![merge_request(1, "other-work"), merge_request(2, "fix-43")];
        assert_eq!(select_latest("Fix 42", candidates), None);
        assert_eq!(select_latest("Fix 42", Vec::new()), None);
    }

    #[test]
    fn select_latest_returns_single_match() {
        let candidates = vec![merge_request(1, "other-work"), merge_request(2, "fix-42")];
        let found = select_latest("Fix 42", candidates).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn select_latest_prefers_last_listed() {
        let candidates = vec![
            merge_request(1, "fix-42"),
            merge_request(2, "Fix42"),
            merge_request(3, "unrelated"),
        ];
        let found = select_latest("Fix 42", candidates).unwrap();
        assert_eq!(found.source_branch, "Fix42");
    }

    #[tokio::test]
    async fn find_latest_queries_open_merge_requests_of_assignee() {
        let mut stale = merge_request(5, "fix-42");
        stale.state = MergeRequestState::Merged;
        let api = FakeGitLab {
            merge_requests: vec![merge_request(4, "fix-42"), stale],
            ..Default::default()
        };
        let ctx = ReportContext::new(&api, ASSIGNEE, Utc::now());

        let found = find_latest(&ctx, &issue(1, 1, "Fix 42")).await.unwrap();

        assert_eq!(found.map(|mr| mr.id), Some(4));
        assert_eq!(api.merge_request_calls(), 1);
    }

    #[tokio::test]
    async fn find_latest_skips_unassigned_issue() {
        let api = FakeGitLab {
            merge_requests: vec![merge_request(4, "fix-42")],
            ..Default::default()
        };
        let ctx = ReportContext::new(&api, ASSIGNEE, Utc::now());
        let mut unassigned = issue(1, 1, "Fix 42");
        unassigned.assignee = None;

        let found = find_latest(&ctx, &unassigned).await.unwrap();

        assert!(found.is_none());
        assert_eq!(api.merge_request_calls(), 0);
    }

    #[tokio::test]
    async fn find_latest_propagates_failure() {
        let api = FakeGitLab {
            fail_on: Some(Endpoint::MergeRequests),
            ..Default::default()
        };
        let ctx = ReportContext::new(&api, ASSIGNEE, Utc::now());

        assert!(find_latest(&ctx, &issue(1, 1, "Fix 42")).await.is_err());
    }
}
