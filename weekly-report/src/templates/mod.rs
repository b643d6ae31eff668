//! Mail subject rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, SubjectRenderer};

use chrono::NaiveDate;

/// Formats a run date the way it appears in subjects.
#[must_use]
pub fn format_run_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
