//! The edit/create protocol: validate, round-trip through the gateway,
//! then merge the server's entity back into the store. Nothing is applied
//! optimistically: the store changes only after the server confirms, so a
//! failed request always leaves the last known good state intact. No
//! operation retries on its own.

use tracing::{info, warn};

use crate::api::dto::{CreateTaskBody, UpdateTaskBody};
use crate::api::{ApiClient, ApiError};
use crate::model::{DraftError, Task, TaskDraft, TaskId, TaskStatus};
use crate::store::{OpenTabs, TaskStore};

/// Error type for workspace operations
#[derive(Debug, thiserror::Error)]
pub enum TaskOpError {
    /// Client-side validation failure; no request was sent
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task has no id; create it on the server first")]
    MissingId,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl TaskOpError {
    /// Short message suitable for direct display to the user
    pub fn user_message(&self) -> String {
        match self {
            TaskOpError::Invalid(e) => e.to_string(),
            TaskOpError::NotFound(id) => format!("Task {} no longer exists", id),
            TaskOpError::MissingId => "This task has not been saved yet".to_string(),
            TaskOpError::Api(e) => e.user_message(),
        }
    }
}

/// The client-side working set: the task store plus the open-tab rail,
/// mutated together so the tab invariants hold across every operation.
#[derive(Debug, Default)]
pub struct Workspace {
    pub store: TaskStore,
    pub tabs: OpenTabs,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Fetch the full task collection and replace the store contents. On
    /// failure the store keeps its previous contents and records the error
    /// message; the same error is returned for the caller to display.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), TaskOpError> {
        match api.list_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                self.store.replace_all(tasks);
                // Tabs may reference tasks that vanished server-side
                for id in self.tabs.open_ids().to_vec() {
                    if !self.store.contains(id) {
                        self.tabs.handle_removed(id);
                    }
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "task load failed");
                self.store.set_load_error(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Validate a draft, create it server-side, and upsert the persisted
    /// entity (now carrying its id and timestamps). Returns the new id.
    pub async fn create(
        &mut self,
        api: &ApiClient,
        draft: &TaskDraft,
    ) -> Result<TaskId, TaskOpError> {
        draft.validate()?;
        // validate() guarantees the due date is present
        let body = CreateTaskBody::from_draft(draft).ok_or(DraftError::DueDateRequired)?;
        let created = api.create_task(&body).await?;
        let id = self
            .store
            .upsert(created)
            .map_err(|_| ApiError::Shape("created task came back without an id".into()))?;
        info!(id, "created task");
        Ok(id)
    }

    /// Send the edited task to the server and replace the store entry with
    /// the response. The update contract does not carry `status`, so a
    /// local status change survives as the derived `completed` flag plus
    /// the local entry's own status field.
    pub async fn update(&mut self, api: &ApiClient, task: &Task) -> Result<(), TaskOpError> {
        let id = task.id.ok_or(TaskOpError::MissingId)?;
        if task.title.trim().is_empty() {
            return Err(DraftError::TitleRequired.into());
        }
        if !self.store.contains(id) {
            return Err(TaskOpError::NotFound(id));
        }

        let body = UpdateTaskBody::from_task(task);
        let mut updated = api.update_task(id, &body).await?;
        // The PUT body carries no status field; keep the local choice over
        // whatever the response echoes back
        updated.set_status(task.status);
        updated.id = Some(id);
        self.store
            .upsert(updated)
            .map_err(|_| ApiError::Shape("updated task came back without an id".into()))?;
        info!(id, "updated task");
        Ok(())
    }

    /// Convenience for single-field status edits from board-style views
    pub async fn set_status(
        &mut self,
        api: &ApiClient,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskOpError> {
        let mut task = self
            .store
            .get(id)
            .cloned()
            .ok_or(TaskOpError::NotFound(id))?;
        task.set_status(status);
        self.update(api, &task).await
    }

    /// Delete server-side, then remove from the store and cascade to the
    /// tab rail. The store entry is untouched until the server confirms,
    /// so there is no window where the task is locally gone but still
    /// exists remotely.
    pub async fn delete(&mut self, api: &ApiClient, id: TaskId) -> Result<(), TaskOpError> {
        if !self.store.contains(id) {
            return Err(TaskOpError::NotFound(id));
        }
        api.delete_task(id).await?;
        self.store.remove(id);
        self.tabs.handle_removed(id);
        info!(id, "deleted task");
        Ok(())
    }

    /// Open a task tab (and activate it); no-op for unknown ids
    pub fn open_tab(&mut self, id: TaskId) {
        let Workspace { store, tabs } = self;
        tabs.open(id, store);
    }

    pub fn close_tab(&mut self, id: TaskId) {
        self.tabs.close(id);
    }
}
