use crate::model::TaskId;
use crate::store::TaskStore;

/// Tab-style open/active selection over store tasks. The open list is
/// ordered and duplicate-free; the active id, when set, is always a member
/// of the open list. Tabs hold only ids; tab content is read from the
/// store so edits show up without any propagation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenTabs {
    open: Vec<TaskId>,
    active: Option<TaskId>,
}

impl OpenTabs {
    pub fn new() -> Self {
        OpenTabs::default()
    }

    /// Open a task and make it active. Appends to the tab order when not
    /// already open. No-op when the id is not in the store.
    pub fn open(&mut self, id: TaskId, store: &TaskStore) {
        if !store.contains(id) {
            return;
        }
        if !self.open.contains(&id) {
            self.open.push(id);
        }
        self.active = Some(id);
    }

    /// Make an already-open tab active. Returns false (and changes nothing)
    /// when the id is not open.
    pub fn activate(&mut self, id: TaskId) -> bool {
        if self.open.contains(&id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Close a tab. When the closed tab was active, the tab that sat
    /// immediately before it becomes active; with no predecessor the first
    /// remaining tab does; with nothing left there is no active tab.
    pub fn close(&mut self, id: TaskId) {
        let Some(index) = self.open.iter().position(|&open_id| open_id == id) else {
            return;
        };
        self.open.remove(index);
        if self.active == Some(id) {
            self.active = if index > 0 {
                Some(self.open[index - 1])
            } else {
                self.open.first().copied()
            };
        }
    }

    /// Cascade for a store deletion: identical to closing the tab. Open
    /// tabs must never reference an id absent from the store.
    pub fn handle_removed(&mut self, id: TaskId) {
        self.close(id);
    }

    pub fn open_ids(&self) -> &[TaskId] {
        &self.open
    }

    pub fn active(&self) -> Option<TaskId> {
        self.active
    }

    pub fn is_open(&self, id: TaskId) -> bool {
        self.open.contains(&id)
    }
}
