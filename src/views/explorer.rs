use std::collections::HashSet;

use crate::model::{Task, TaskStatus};

/// Section ids used by the explorer tree
pub const CURRENT_SPRINT: &str = "current-sprint";
pub const BACKLOG: &str = "backlog";

/// One collapsible group in the explorer tree
#[derive(Debug, PartialEq)]
pub struct TaskGroup<'a> {
    pub id: &'static str,
    pub title: &'static str,
    pub tasks: Vec<&'a Task>,
}

/// Sprint/backlog grouping for the tree-style explorer: "current" holds
/// in-progress and review work, "backlog" holds todo. Done tasks are
/// excluded; this view shows active and pending work only.
pub fn explorer_groups(tasks: &[Task]) -> Vec<TaskGroup<'_>> {
    vec![
        TaskGroup {
            id: CURRENT_SPRINT,
            title: "Current Sprint",
            tasks: tasks
                .iter()
                .filter(|t| {
                    t.status == TaskStatus::InProgress || t.status == TaskStatus::Review
                })
                .collect(),
        },
        TaskGroup {
            id: BACKLOG,
            title: "Backlog",
            tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Todo)
                .collect(),
        },
    ]
}

/// Which explorer sections are expanded. This is per-view UI state, not
/// task data; it survives re-derivation of the groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerState {
    expanded: HashSet<String>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        // Current sprint starts open
        let mut expanded = HashSet::new();
        expanded.insert(CURRENT_SPRINT.to_string());
        ExplorerState { expanded }
    }
}

impl ExplorerState {
    pub fn is_expanded(&self, section_id: &str) -> bool {
        self.expanded.contains(section_id)
    }

    pub fn toggle(&mut self, section_id: &str) {
        if !self.expanded.remove(section_id) {
            self.expanded.insert(section_id.to_string());
        }
    }
}
