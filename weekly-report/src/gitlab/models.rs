//! GitLab resources as returned by the REST API.
//!
//! Only the fields the report needs are deserialized; everything else in the
//! payload is ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A GitLab user reference embedded in issues and merge requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    /// User id.
    pub id: u64,

    /// Login name.
    #[serde(default)]
    pub username: String,
}

/// State of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Opened,
    Closed,
    #[serde(other)]
    Other,
}

/// State of a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Locked,
    Merged,
    #[serde(other)]
    Other,
}

/// An issue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    /// Global issue id.
    pub id: u64,

    /// Project-local issue number.
    pub iid: u64,

    pub title: String,

    /// Id of the project the issue belongs to.
    pub project_id: u64,

    /// Primary assignee, if any.
    #[serde(default)]
    pub assignee: Option<UserRef>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    pub web_url: String,

    pub state: IssueState,

    /// Id of the issue this one was moved to. `None` or `0` when not moved.
    #[serde(default)]
    pub moved_to_id: Option<u64>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Returns the id of the primary assignee.
    #[must_use]
    pub fn assignee_id(&self) -> Option<u64> {
        self.assignee.as_ref().map(|user| user.id)
    }

    /// Returns true if the issue was migrated to another issue.
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self.moved_to_id, Some(id) if id != 0)
    }
}

/// A merge request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    pub source_branch: String,
    pub author: UserRef,
    pub state: MergeRequestState,
    pub web_url: String,
}

/// A project, reduced to what the name lookup needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}
