//! Query-string filters for the list endpoints.

use super::models::{IssueState, MergeRequestState};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Relative due-date filters evaluated by GitLab itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueDateFilter {
    /// Due within the current week.
    Week,
    /// Past due.
    Overdue,
}

/// Filters for `GET /issues`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueQuery {
    pub scope: &'static str,
    pub assignee_username: String,
    pub state: IssueState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDateFilter>,
}

impl IssueQuery {
    /// Issues assigned to `username` in the given state.
    #[must_use]
    pub fn assigned_to(username: &str, state: IssueState) -> Self {
        Self {
            scope: "assigned_to_me",
            assignee_username: username.to_string(),
            state,
            updated_after: None,
            due_date: None,
        }
    }

    /// Restricts to issues updated after `timestamp`.
    #[must_use]
    pub fn updated_after(mut self, timestamp: DateTime<Utc>) -> Self {
        self.updated_after = Some(timestamp);
        self
    }

    /// Restricts to issues matching a relative due-date filter.
    #[must_use]
    pub fn due(mut self, filter: DueDateFilter) -> Self {
        self.due_date = Some(filter);
        self
    }
}

/// Filters for `GET /merge_requests`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRequestQuery {
    pub scope: &'static str,
    pub author_id: u64,
    pub state: MergeRequestState,
}

impl MergeRequestQuery {
    /// Open merge requests authored by `author_id`, across all projects.
    #[must_use]
    pub fn open_by_author(author_id: u64) -> Self {
        Self {
            scope: "all",
            author_id,
            state: MergeRequestState::Opened,
        }
    }
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectQuery {
    pub membership: bool,
    pub simple: bool,
    pub last_activity_after: DateTime<Utc>,
}

impl ProjectQuery {
    /// Projects the token user is a member of, active after `timestamp`.
    #[must_use]
    pub fn active_memberships(timestamp: DateTime<Utc>) -> Self {
        Self {
            membership: true,
            simple: true,
            last_activity_after: timestamp,
        }
    }
}
