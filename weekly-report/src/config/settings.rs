//! Settings file contents.

use crate::config::ConfigError;
use crate::context::{
    DEFAULT_LOOKBACK_WEEKS, DEFAULT_PROJECT_ACTIVITY_DAYS, MAX_LOOKBACK_WEEKS,
    MAX_PROJECT_ACTIVITY_DAYS,
};
use crate::templates::SubjectRenderer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Environment variable overriding `gitlab.token`.
pub const GITLAB_TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Environment variable overriding `smtp.password`.
pub const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";

/// Default subject format; `{{date}}` is the run date as `YYYY-MM-DD`.
pub const DEFAULT_SUBJECT_FORMAT: &str = "Weekly report ({{date}})";

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub gitlab: GitLabSettings,
    pub smtp: SmtpSettings,
    pub report: ReportSettings,
}

/// `[gitlab]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabSettings {
    /// Instance base URL, e.g. `https://git.domain.com`.
    pub url: String,

    /// Personal access token with `read_api` scope.
    #[serde(default)]
    pub token: String,

    /// Username whose assigned issues are reported.
    pub username: String,
}

/// `[smtp]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SmtpSettings {
    pub host: String,

    /// 465 selects implicit TLS, anything else STARTTLS.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Sender address; defaults to `username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl SmtpSettings {
    /// Returns the address the report is sent from.
    #[must_use]
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSettings {
    /// Single recipient of the report.
    pub recipient: String,

    #[serde(default = "default_lookback_weeks")]
    pub lookback_weeks: u32,

    #[serde(default = "default_project_activity_days")]
    pub project_activity_days: u32,

    #[serde(default = "default_subject_format")]
    pub subject_format: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_lookback_weeks() -> u32 {
    DEFAULT_LOOKBACK_WEEKS
}

fn default_project_activity_days() -> u32 {
    DEFAULT_PROJECT_ACTIVITY_DAYS
}

fn default_subject_format() -> String {
    DEFAULT_SUBJECT_FORMAT.to_string()
}

impl Settings {
    /// Loads, overrides and validates settings from `path`.
    ///
    /// Secrets are taken from the environment when set
    /// ([`GITLAB_TOKEN_ENV`], [`SMTP_PASSWORD_ENV`]), then `token_override`
    /// wins over both file and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed,
    /// or fails validation.
    pub fn load(path: &Path, token_override: Option<&str>) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
                example: super::example_config(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError {
                path: path.display().to_string(),
                source: e,
            })?;

        settings.apply_env_overrides();
        if let Some(token) = token_override.filter(|token| !token.trim().is_empty()) {
            settings.gitlab.token = token.to_string();
        }

        settings.validate(path)?;
        Ok(settings)
    }

    /// Replaces secrets with values from the environment, when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty_env(GITLAB_TOKEN_ENV) {
            self.gitlab.token = token;
        }
        if let Some(password) = non_empty_env(SMTP_PASSWORD_ENV) {
            self.smtp.password = password;
        }
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        let url = Url::parse(&self.gitlab.url)
            .map_err(|e| invalid(&format!("gitlab.url is not a valid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("gitlab.url must use http or https"));
        }

        let required = [
            ("gitlab.token", &self.gitlab.token),
            ("gitlab.username", &self.gitlab.username),
            ("smtp.host", &self.smtp.host),
            ("smtp.username", &self.smtp.username),
            ("smtp.password", &self.smtp.password),
            ("report.recipient", &self.report.recipient),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(&format!("{field} is required")));
            }
        }

        if self.smtp.port == 0 {
            return Err(invalid("smtp.port must be non-zero"));
        }
        if !(1..=MAX_LOOKBACK_WEEKS).contains(&self.report.lookback_weeks) {
            return Err(invalid(&format!(
                "report.lookback-weeks must be between 1 and {MAX_LOOKBACK_WEEKS}"
            )));
        }
        if !(1..=MAX_PROJECT_ACTIVITY_DAYS).contains(&self.report.project_activity_days) {
            return Err(invalid(&format!(
                "report.project-activity-days must be between 1 and {MAX_PROJECT_ACTIVITY_DAYS}"
            )));
        }
        if !self
            .report
            .subject_format
            .replace(' ', "")
            .contains("{{date}}")
        {
            return Err(invalid("report.subject-format must contain {{date}}"));
        }
        SubjectRenderer::new()
            .render(&self.report.subject_format, NaiveDate::default())
            .map_err(|e| invalid(&format!("report.subject-format does not render: {e}")))?;

        Ok(())
    }

    /// Placeholder settings shown when no configuration file exists.
    #[must_use]
    pub fn example() -> Self {
        Self {
            gitlab: GitLabSettings {
                url: "https://git.domain.com".to_string(),
                token: "gitlab-secret-token".to_string(),
                username: "gitlab-username".to_string(),
            },
            smtp: SmtpSettings {
                host: "smtp.domain.com".to_string(),
                port: default_smtp_port(),
                username: "email-username".to_string(),
                password: "email-password".to_string(),
                from: None,
            },
            report: ReportSettings {
                recipient: "manager@domain.com".to_string(),
                lookback_weeks: default_lookback_weeks(),
                project_activity_days: default_project_activity_days(),
                subject_format: default_subject_format(),
            },
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
