//! Runner error types.

/// Errors that can occur during a run. Each one aborts the run before any
/// mail is sent.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitLab query errors.
    #[error(transparent)]
    Upstream(#[from] crate::gitlab::UpstreamError),

    /// Subject rendering errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Mail building or delivery errors.
    #[error(transparent)]
    Mail(#[from] crate::mail::MailError),

    /// Reading the difficulties from stdin failed.
    #[error("Failed to read difficulties: {0}")]
    Input(#[from] std::io::Error),
}
