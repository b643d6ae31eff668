//! Project id to display name lookup.

use crate::context::ReportContext;
use crate::gitlab::{GitLabApi, Project, ProjectQuery, UpstreamError};
use std::collections::HashMap;
use tracing::{info, info_span, Instrument};

/// Display names of recently active projects, keyed by project id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectNames {
    names: HashMap<u64, String>,
}

impl ProjectNames {
    /// Returns the name of `project_id`, or an empty string when the project
    /// is unknown (archived, inactive, or not a membership).
    #[must_use]
    pub fn name_of(&self, project_id: u64) -> &str {
        self.names.get(&project_id).map_or("", String::as_str)
    }

    /// Returns the number of known projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no project is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Project> for ProjectNames {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|project| (project.id, project.name))
                .collect(),
        }
    }
}

/// Resolves names of the projects the token user is a member of that saw
/// activity within the context's project window.
///
/// An empty result is not an error.
///
/// # Errors
///
/// Returns [`UpstreamError`] if GitLab cannot be queried.
pub async fn resolve_names<A: GitLabApi>(
    ctx: &ReportContext<'_, A>,
) -> Result<ProjectNames, UpstreamError> {
    let since = ctx.projects_active_since();
    let span = info_span!("resolve_project_names", since = %since);

    async {
        let projects = ctx
            .api()
            .list_projects(&ProjectQuery::active_memberships(since))
            .await?;
        let names: ProjectNames = projects.into_iter().collect();

        info!(count = names.len(), "Resolved project names");
        Ok(names)
    }
    .instrument(span)
    .await
}
