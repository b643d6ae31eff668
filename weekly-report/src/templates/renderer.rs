//! Subject renderer.

use super::{format_run_date, TemplateError};
use chrono::NaiveDate;
use handlebars::{no_escape, Handlebars};
use serde_json::json;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (subjects are plain text)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders mail subjects from a format string such as
/// `Weekly report ({{date}})`.
pub struct SubjectRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for SubjectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectRenderer {
    /// Creates a new subject renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders `format` with `date` exposed as `{{date}}` (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not a valid template or references
    /// an unknown variable.
    pub fn render(&self, format: &str, date: NaiveDate) -> Result<String, TemplateError> {
        let data = json!({ "date": format_run_date(date) });
        Ok(self.handlebars.render_template(format, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SUBJECT_FORMAT;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn renders_default_subject() {
        let subject = SubjectRenderer::new()
            .render(DEFAULT_SUBJECT_FORMAT, date())
            .unwrap();
        assert_eq!(subject, "Weekly report (2024-05-10)");
    }

    #[test]
    fn no_html_escaping() {
        let subject = SubjectRenderer::new()
            .render("R&D <status> {{date}}", date())
            .unwrap();
        assert_eq!(subject, "R&D <status> 2024-05-10");
    }

    #[test]
    fn unknown_variable_fails_in_strict_mode() {
        let result = SubjectRenderer::new().render("{{author}} {{date}}", date());
        assert!(matches!(result, Err(TemplateError::RenderError(_))));
    }
}
