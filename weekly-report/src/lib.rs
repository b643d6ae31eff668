#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod context;
pub mod difficulties;
pub mod gitlab;
pub mod issues;
pub mod mail;
pub mod merge_requests;
pub mod projects;
pub mod rate_limit;
pub mod report;
pub mod runner;
pub mod summary;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_settings, ConfigError, Settings};
pub use context::ReportContext;
pub use difficulties::{read_difficulties, read_difficulties_blocking};
pub use gitlab::{GitLabApi, GitLabClient, Issue, MergeRequest, Project, UpstreamError};
pub use issues::{fetch_closed, fetch_due_this_week};
pub use mail::{MailError, MailTransport, OutgoingReport, SmtpMailer};
pub use merge_requests::{find_latest, select_latest, slugify};
pub use projects::{resolve_names, ProjectNames};
pub use report::{
    assemble, group_by_project, render_free_text_section, render_section, AssembledReport,
    EnrichedIssue, GroupedIssues, Report,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
pub use templates::{SubjectRenderer, TemplateError};
