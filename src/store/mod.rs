//! The in-memory task store: single source of truth for the signed-in
//! user's tasks. Views never keep their own copies of task fields; they
//! re-derive from this store on every read, so an edit made anywhere is
//! visible everywhere on the next render.

pub mod tabs;

pub use tabs::OpenTabs;

use std::fmt;

use indexmap::IndexMap;

use crate::model::{Task, TaskId};

/// Change notification delivered to subscribers after each mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The whole collection was replaced by a load
    Loaded,
    Upserted(TaskId),
    Removed(TaskId),
}

type Subscriber = Box<dyn FnMut(&StoreEvent) + Send>;

/// Error type for store mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("task has no id; create it on the server first")]
    MissingId,
}

/// Keyed by task id, iteration in insertion/load order. Sorting belongs to
/// the view projections, never to the store itself.
#[derive(Default)]
pub struct TaskStore {
    tasks: IndexMap<TaskId, Task>,
    loaded: bool,
    last_error: Option<String>,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("loaded", &self.loaded)
            .field("last_error", &self.last_error)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Register a change listener. Listeners only receive the event; they
    /// re-read the store afterwards to see the new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + Send + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    fn notify(&mut self, event: StoreEvent) {
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for listener in &mut subscribers {
            listener(&event);
        }
        self.subscribers = subscribers;
    }

    /// Replace the whole collection after a successful load. Tasks without
    /// an id cannot be keyed and are dropped.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks
            .into_iter()
            .filter_map(|t| t.id.map(|id| (id, t)))
            .collect();
        self.loaded = true;
        self.last_error = None;
        self.notify(StoreEvent::Loaded);
    }

    /// Record a load failure. Existing contents are kept as the last known
    /// good state.
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Insert a new task or replace the existing entry with the same id
    pub fn upsert(&mut self, task: Task) -> Result<TaskId, StoreError> {
        let id = task.id.ok_or(StoreError::MissingId)?;
        self.tasks.insert(id, task);
        self.notify(StoreEvent::Upserted(id));
        Ok(id)
    }

    /// Remove a task by id, preserving the order of the remaining entries.
    /// Removing an absent id is a no-op, not an error.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.shift_remove(&id).is_some();
        if removed {
            self.notify(StoreEvent::Removed(id));
        }
        removed
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Current contents in insertion/load order, cloned for projection input
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether an initial load has completed successfully
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Message from the most recent failed load, cleared by the next
    /// successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
