//! Per-run state shared by the pipeline stages.

use crate::gitlab::GitLabApi;
use chrono::{DateTime, Duration, Utc};

/// Default look-back for closed issues, in weeks.
pub const DEFAULT_LOOKBACK_WEEKS: u32 = 1;

/// Default activity window for the project name lookup, in days.
pub const DEFAULT_PROJECT_ACTIVITY_DAYS: u32 = 7;

/// Longest accepted look-back, in weeks.
pub const MAX_LOOKBACK_WEEKS: u32 = 520;

/// Longest accepted project activity window, in days.
pub const MAX_PROJECT_ACTIVITY_DAYS: u32 = 3650;

/// Everything a pipeline stage needs to query GitLab for one run.
///
/// Built once at the start of a run and passed by reference; the instant
/// `now` is captured once so every relative window is computed from the same
/// point in time.
#[derive(Debug)]
pub struct ReportContext<'a, A> {
    api: &'a A,
    assignee: String,
    now: DateTime<Utc>,
    lookback_weeks: u32,
    project_activity_days: u32,
}

impl<'a, A: GitLabApi> ReportContext<'a, A> {
    /// Creates a context for `assignee` with default windows.
    pub fn new(api: &'a A, assignee: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            api,
            assignee: assignee.into(),
            now,
            lookback_weeks: DEFAULT_LOOKBACK_WEEKS,
            project_activity_days: DEFAULT_PROJECT_ACTIVITY_DAYS,
        }
    }

    /// Sets the closed-issue look-back, clamped to `1..=MAX_LOOKBACK_WEEKS`.
    #[must_use]
    pub fn with_lookback_weeks(mut self, weeks: u32) -> Self {
        self.lookback_weeks = weeks.clamp(1, MAX_LOOKBACK_WEEKS);
        self
    }

    /// Sets the project activity window, clamped to
    /// `1..=MAX_PROJECT_ACTIVITY_DAYS`.
    #[must_use]
    pub fn with_project_activity_days(mut self, days: u32) -> Self {
        self.project_activity_days = days.clamp(1, MAX_PROJECT_ACTIVITY_DAYS);
        self
    }

    /// Returns the GitLab API handle.
    pub fn api(&self) -> &'a A {
        self.api
    }

    /// Returns the username whose issues are reported.
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Returns the instant the run started.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Returns the closed-issue look-back in weeks.
    pub fn lookback_weeks(&self) -> u32 {
        self.lookback_weeks
    }

    /// Returns the start of the closed-issue window for `weeks`, clamped to
    /// `1..=MAX_LOOKBACK_WEEKS`.
    pub fn closed_since(&self, weeks: u32) -> DateTime<Utc> {
        let weeks = weeks.clamp(1, MAX_LOOKBACK_WEEKS);
        self.now - Duration::days(i64::from(weeks) * 7)
    }

    /// Returns the start of the project activity window.
    pub fn projects_active_since(&self) -> DateTime<Utc> {
        self.now - Duration::days(i64::from(self.project_activity_days))
    }
}
