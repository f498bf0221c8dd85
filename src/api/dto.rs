//! Wire representations of tasks and the request bodies the backend expects.
//!
//! The single-task endpoint nests the owner and category as objects while
//! the list endpoint sends flat `userId`/`categoryId` columns; `TaskDto`
//! accepts both and flattens to the client-side [`Task`] shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    ActivityEntry, CategoryId, Task, TaskDraft, TaskId, TaskPriority, TaskStatus, UserId,
};
use crate::util::date::{parse_due_date, parse_timestamp};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(default)]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw string; may be `2024-06-01` or a full timestamp
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Nested owner object from the single-task endpoint
    #[serde(default)]
    pub user: Option<IdRef>,
    /// Nested category object from the single-task endpoint
    #[serde(default)]
    pub category: Option<IdRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
}

/// A nested reference from which only the id is taken
#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

impl TaskDto {
    /// Flatten to the client model: truncate due dates to the calendar
    /// date, prefer flat id columns over nested objects.
    pub fn into_task(self) -> Task {
        let user_id = self.user_id.or(self.user.map(|u| u.id));
        let category_id = self.category_id.or(self.category.map(|c| c.id));
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date: self.due_date.as_deref().and_then(parse_due_date),
            status: self.status,
            priority: self.priority,
            completed: self.completed,
            user_id,
            category_id,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
            story_points: self.story_points,
            assignee: self.assignee,
            labels: self.labels,
            dependencies: self.dependencies,
            acceptance_criteria: self.acceptance_criteria,
            activity: self.activity,
        }
    }
}

/// Decode a single-task payload (the value under `data`)
pub fn task_from_value(value: Value) -> Result<Task, serde_json::Error> {
    let dto: TaskDto = serde_json::from_value(value)?;
    Ok(dto.into_task())
}

/// Body for `POST /tasks`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Serialized as `YYYY-MM-DD`
    pub due_date: chrono::NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl CreateTaskBody {
    /// Build from a validated draft. `completed` is derived from the
    /// draft's status.
    pub fn from_draft(draft: &TaskDraft) -> Option<Self> {
        Some(CreateTaskBody {
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            due_date: draft.due_date?,
            priority: draft.priority,
            status: draft.status,
            completed: draft.status == TaskStatus::Done,
            category_id: draft.category_id,
        })
    }
}

/// Body for `PUT /tasks/{id}`. The update contract carries `completed` but
/// not `status`; callers that change workflow status derive `completed`
/// from it before building this body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub priority: TaskPriority,
    pub completed: bool,
    /// Explicit null clears the category server-side
    pub category_id: Option<CategoryId>,
}

impl UpdateTaskBody {
    pub fn from_task(task: &Task) -> Self {
        UpdateTaskBody {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            completed: task.status == TaskStatus::Done,
            category_id: task.category_id,
        }
    }
}
