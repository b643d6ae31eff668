//! GitLab REST v4 access.
//!
//! The pipeline only ever talks to GitLab through [`GitLabApi`], so it can be
//! driven by [`GitLabClient`] in production and by an in-memory fake in tests.

mod client;
mod error;
mod models;
mod query;

pub use client::GitLabClient;
pub use error::UpstreamError;
pub use models::{Issue, IssueState, MergeRequest, MergeRequestState, Project, UserRef};
pub use query::{DueDateFilter, IssueQuery, MergeRequestQuery, ProjectQuery};

use std::future::Future;

/// Read-only GitLab queries needed to build a report.
///
/// Every method returns the complete result set (all pages) in the order
/// GitLab returned it.
pub trait GitLabApi {
    /// Lists issues matching `query` (`GET /issues`).
    fn list_issues(
        &self,
        query: &IssueQuery,
    ) -> impl Future<Output = Result<Vec<Issue>, UpstreamError>> + Send;

    /// Lists merge requests matching `query` (`GET /merge_requests`).
    fn list_merge_requests(
        &self,
        query: &MergeRequestQuery,
    ) -> impl Future<Output = Result<Vec<MergeRequest>, UpstreamError>> + Send;

    /// Lists projects matching `query` (`GET /projects`).
    fn list_projects(
        &self,
        query: &ProjectQuery,
    ) -> impl Future<Output = Result<Vec<Project>, UpstreamError>> + Send;
}
