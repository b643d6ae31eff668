//! Runner configuration.

use std::path::{Path, PathBuf};

/// Command-line level options for a run.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Path to the settings file; the default location when `None`.
    config_path: Option<PathBuf>,
    /// GitLab token overriding the settings file and environment.
    token: Option<String>,
    /// Whether to print the report instead of sending it.
    dry_run: bool,
    /// Whether to prompt for difficulties on stdin.
    prompt_difficulties: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(config_path: Option<PathBuf>, dry_run: bool) -> Self {
        Self {
            config_path,
            token: None,
            dry_run,
            prompt_difficulties: true,
        }
    }

    /// Sets a token that wins over the settings file and environment.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Enables or disables the interactive difficulties prompt.
    pub fn with_difficulties_prompt(mut self, prompt: bool) -> Self {
        self.prompt_difficulties = prompt;
        self
    }

    /// Returns the settings file path, if one was given.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Returns the token override.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether difficulties are read from stdin.
    pub fn prompt_difficulties(&self) -> bool {
        self.prompt_difficulties
    }
}
