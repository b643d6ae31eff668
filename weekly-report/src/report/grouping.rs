//! Grouping of issues by project.

use crate::gitlab::{Issue, MergeRequest};

/// Issues of one project, in the order they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup<T> {
    pub project_id: u64,
    pub entries: Vec<T>,
}

/// Issues partitioned by project.
///
/// Groups keep the order in which their project first appeared, and entries
/// keep their input order. Empty groups are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedIssues<T = Issue> {
    groups: Vec<ProjectGroup<T>>,
}

impl<T> Default for GroupedIssues<T> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<T> GroupedIssues<T> {
    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the number of project groups.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the number of entries across all groups.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    /// Iterates over the groups in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectGroup<T>> {
        self.groups.iter()
    }
}

impl<T> FromIterator<ProjectGroup<T>> for GroupedIssues<T> {
    fn from_iter<I: IntoIterator<Item = ProjectGroup<T>>>(iter: I) -> Self {
        Self {
            groups: iter
                .into_iter()
                .filter(|group| !group.entries.is_empty())
                .collect(),
        }
    }
}

impl<T> IntoIterator for GroupedIssues<T> {
    type Item = ProjectGroup<T>;
    type IntoIter = std::vec::IntoIter<ProjectGroup<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GroupedIssues<T> {
    type Item = &'a ProjectGroup<T>;
    type IntoIter = std::slice::Iter<'a, ProjectGroup<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// An issue with the merge request correlated to it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedIssue {
    pub issue: Issue,
    pub merge_request: Option<MergeRequest>,
}

impl From<Issue> for EnrichedIssue {
    fn from(issue: Issue) -> Self {
        Self {
            issue,
            merge_request: None,
        }
    }
}

/// Partitions `issues` by project id, preserving input order.
#[must_use]
pub fn group_by_project(issues: impl IntoIterator<Item = Issue>) -> GroupedIssues<Issue> {
    let mut groups: Vec<ProjectGroup<Issue>> = Vec::new();

    for issue in issues {
        match groups
            .iter_mut()
            .find(|group| group.project_id == issue.project_id)
        {
            Some(group) => group.entries.push(issue),
            None => groups.push(ProjectGroup {
                project_id: issue.project_id,
                entries: vec![issue],
            }),
        }
    }

    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::issue;

    #[test]
    fn groups_preserve_input_order() {
        let grouped = group_by_project(vec![
            issue(1, 20, "a"),
            issue(2, 10, "b"),
            issue(3, 20, "c"),
            issue(4, 30, "d"),
            issue(5, 10, "e"),
        ]);

        let layout: Vec<(u64, Vec<u64>)> = grouped
            .iter()
            .map(|g| (g.project_id, g.entries.iter().map(|i| i.id).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![(20, vec![1, 3]), (10, vec![2, 5]), (30, vec![4])]
        );
    }

    #[test]
    fn counts_match_input_and_no_group_is_empty() {
        let input: Vec<_> = (0..17).map(|n| issue(n, n % 4, "x")).collect();
        let grouped = group_by_project(input.clone());

        assert_eq!(grouped.entry_count(), input.len());
        assert_eq!(grouped.project_count(), 4);
        assert!(grouped.iter().all(|g| !g.entries.is_empty()));
    }

    #[test]
    fn empty_input_gives_empty_groups() {
        let grouped = group_by_project(Vec::new());
        assert!(grouped.is_empty());
        assert_eq!(grouped.entry_count(), 0);
    }

    #[test]
    fn collecting_drops_empty_groups() {
        let grouped: GroupedIssues<u8> = vec![
            ProjectGroup {
                project_id: 1,
                entries: vec![],
            },
            ProjectGroup {
                project_id: 2,
                entries: vec![9],
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(grouped.project_count(), 1);
        assert_eq!(grouped.iter().next().unwrap().project_id, 2);
    }
}
