//! In-memory GitLab used by the pipeline unit tests.

use crate::gitlab::{
    DueDateFilter, GitLabApi, Issue, IssueQuery, IssueState, MergeRequest, MergeRequestQuery,
    MergeRequestState, Project, ProjectQuery, UpstreamError, UserRef,
};
use std::sync::Mutex;

/// Assignee used by the fixtures.
pub(crate) const ASSIGNEE_ID: u64 = 7;
pub(crate) const ASSIGNEE: &str = "jdoe";

/// A request seen by [`FakeGitLab`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Issues(IssueQuery),
    MergeRequests(MergeRequestQuery),
    Projects(ProjectQuery),
}

/// Endpoint that [`FakeGitLab`] should fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Issues,
    MergeRequests,
    Projects,
}

#[derive(Debug, Default)]
pub(crate) struct FakeGitLab {
    pub closed: Vec<Issue>,
    pub due_this_week: Vec<Issue>,
    pub overdue: Vec<Issue>,
    pub merge_requests: Vec<MergeRequest>,
    pub projects: Vec<Project>,
    pub fail_on: Option<Endpoint>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeGitLab {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn merge_request_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::MergeRequests(_)))
            .count()
    }

    pub(crate) fn project_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Projects(_)))
            .count()
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(endpoint) {
            return Err(UpstreamError::Status {
                endpoint: format!("{endpoint:?}").to_lowercase(),
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

impl GitLabApi for FakeGitLab {
    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, UpstreamError> {
        self.record(Call::Issues(query.clone()), Endpoint::Issues)?;
        let issues = match (query.state, query.due_date) {
            (IssueState::Closed, _) => &self.closed,
            (_, Some(DueDateFilter::Week)) => &self.due_this_week,
            (_, Some(DueDateFilter::Overdue)) => &self.overdue,
            _ => return Ok(Vec::new()),
        };
        Ok(issues.clone())
    }

    async fn list_merge_requests(
        &self,
        query: &MergeRequestQuery,
    ) -> Result<Vec<MergeRequest>, UpstreamError> {
        self.record(Call::MergeRequests(query.clone()), Endpoint::MergeRequests)?;
        Ok(self
            .merge_requests
            .iter()
            .filter(|mr| mr.author.id == query.author_id && mr.state == query.state)
            .cloned()
            .collect())
    }

    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, UpstreamError> {
        self.record(Call::Projects(query.clone()), Endpoint::Projects)?;
        Ok(self.projects.clone())
    }
}

pub(crate) fn user() -> UserRef {
    UserRef {
        id: ASSIGNEE_ID,
        username: ASSIGNEE.to_string(),
    }
}

/// An open issue assigned to the fixture user.
pub(crate) fn issue(id: u64, project_id: u64, title: &str) -> Issue {
    Issue {
        id,
        iid: id,
        title: title.to_string(),
        project_id,
        assignee: Some(user()),
        due_date: None,
        web_url: format!("https://git.example.com/p{project_id}/-/issues/{id}"),
        state: IssueState::Opened,
        moved_to_id: None,
        updated_at: None,
    }
}

pub(crate) fn closed_issue(id: u64, project_id: u64, title: &str) -> Issue {
    Issue {
        state: IssueState::Closed,
        ..issue(id, project_id, title)
    }
}

/// An open merge request authored by the fixture user.
pub(crate) fn merge_request(id: u64, source_branch: &str) -> MergeRequest {
    MergeRequest {
        id,
        iid: id,
        title: format!("Draft: {source_branch}"),
        source_branch: source_branch.to_string(),
        author: user(),
        state: MergeRequestState::Opened,
        web_url: format!("https://git.example.com/p1/-/merge_requests/{id}"),
    }
}

pub(crate) fn project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
    }
}
