//! Orchestrates a report run: assemble, prompt, render, send.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::{load_settings, Settings};
use crate::context::ReportContext;
use crate::difficulties::read_difficulties_blocking;
use crate::gitlab::GitLabClient;
use crate::mail::{MailTransport, OutgoingReport, SmtpMailer};
use crate::report::{assemble, AssembledReport, DIFFICULTIES_HEADING};
use crate::summary::RunSummary;
use crate::templates::SubjectRenderer;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::io::{BufReader, Write};
use tracing::{info, warn};

/// Runs the weekly report pipeline.
pub struct Runner {
    config: RunnerConfig,
    settings: Settings,
    client: GitLabClient,
    subjects: SubjectRenderer,
}

impl Runner {
    /// Loads settings and builds the GitLab client.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = load_settings(config.config_path(), config.token())?;
        Self::with_settings(config, settings)
    }

    /// Builds a runner from already loaded settings.
    pub fn with_settings(config: RunnerConfig, settings: Settings) -> Result<Self, RunnerError> {
        let client = GitLabClient::new(&settings.gitlab.url, &settings.gitlab.token)?;
        Ok(Self {
            config,
            settings,
            client,
            subjects: SubjectRenderer::new(),
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Executes the full flow.
    ///
    /// Nothing is sent if any step fails.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let now = Local::now();
        let mut summary = RunSummary::new(self.config.dry_run());

        let assembled = self.assemble(now.with_timezone(&Utc)).await?;
        summary.record_report(&assembled);

        let difficulties = if self.config.prompt_difficulties() {
            prompt_difficulties().await?
        } else {
            Vec::new()
        };
        summary.difficulties = difficulties.len();

        let outgoing = self.compose(&assembled, &difficulties, now.date_naive())?;

        if self.config.dry_run() {
            print_dry_run_preview(&outgoing);
            return Ok(summary);
        }

        let mailer = SmtpMailer::new(&self.settings.smtp)?;
        self.deliver(&mailer, &outgoing).await?;
        summary.sent = true;

        Ok(summary)
    }

    /// Fetches and correlates the issue sections as of `now`.
    pub async fn assemble(&self, now: DateTime<Utc>) -> Result<AssembledReport, RunnerError> {
        let report = &self.settings.report;
        let ctx = ReportContext::new(&self.client, self.settings.gitlab.username.as_str(), now)
            .with_lookback_weeks(report.lookback_weeks)
            .with_project_activity_days(report.project_activity_days);

        Ok(assemble(&ctx).await?)
    }

    /// Renders subject and body for the configured recipient.
    pub fn compose<S: AsRef<str>>(
        &self,
        assembled: &AssembledReport,
        difficulties: &[S],
        run_date: NaiveDate,
    ) -> Result<OutgoingReport, RunnerError> {
        let subject = self
            .subjects
            .render(&self.settings.report.subject_format, run_date)?;
        let body = assembled.render(difficulties).to_text();

        Ok(OutgoingReport {
            recipient: self.settings.report.recipient.clone(),
            subject,
            body,
        })
    }

    /// Hands `report` to `mailer`.
    pub async fn deliver<M: MailTransport>(
        &self,
        mailer: &M,
        report: &OutgoingReport,
    ) -> Result<(), RunnerError> {
        if report.body.is_empty() {
            warn!("Report body is empty, sending anyway");
        }
        info!(recipient = %report.recipient, subject = %report.subject, "Sending report");
        mailer.send(report).await?;
        Ok(())
    }
}

/// Prompts on stdout and reads difficulties from stdin.
async fn prompt_difficulties() -> Result<Vec<String>, RunnerError> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{DIFFICULTIES_HEADING}")?;
    stdout.flush()?;

    Ok(read_difficulties_blocking(BufReader::new(std::io::stdin())).await?)
}

fn print_dry_run_preview(report: &OutgoingReport) {
    println!("\n[DRY RUN] Would send to: {}", report.recipient);
    println!("  Subject: {}", report.subject);
    println!();
    for line in report.body.lines() {
        println!("    {line}");
    }
    println!();
}
