use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric ids assigned by the backend. Draft tasks have none until the
/// server persists them.
pub type TaskId = i64;
pub type CategoryId = i64;
pub type UserId = i64;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
    /// Catch-all for status strings the server sends that this client does
    /// not recognize. Kept so the task still shows up on the board instead
    /// of vanishing.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Human label shown in column headers and task detail views
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
            TaskStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "todo" | "to_do" => Ok(TaskStatus::Todo),
            "in_progress" | "inprogress" | "active" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        };
        f.write_str(s)
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" | "med" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// One entry in a task's activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user: String,
    pub date: String,
    pub comment: String,
}

/// A task as the client sees it. Wire DTOs (nested category/user objects,
/// timestamped due dates) are flattened into this shape by `api::dto`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned id; `None` only for drafts that have not been created yet
    #[serde(default)]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date only; any time-of-day component from the wire is dropped
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
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
    /// Server-assigned, read-only
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,

    // --- Extended fields used by richer views only ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptance_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activity: Vec<ActivityEntry>,
}

impl Task {
    /// Create a minimal task with the given title (remaining fields default)
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: None,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            completed: false,
            user_id: None,
            category_id: None,
            created_at: None,
            updated_at: None,
            story_points: None,
            assignee: None,
            labels: Vec::new(),
            dependencies: Vec::new(),
            acceptance_criteria: Vec::new(),
            activity: Vec::new(),
        }
    }

    /// Set the workflow status, keeping the `completed` flag in sync.
    /// `completed` is defined as `status == Done` everywhere in this client.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.completed = status == TaskStatus::Done;
    }
}

/// Field values collected from a create form, validated before any request
/// is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category_id: Option<CategoryId>,
}

/// Client-side validation failure; no request is made when one of these
/// is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Task title is required")]
    TitleRequired,
    #[error("Due date is required")]
    DueDateRequired,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        TaskDraft {
            title: title.into(),
            due_date: Some(due_date),
            ..TaskDraft::default()
        }
    }

    /// Enforce the form-level required fields: a non-blank title and a due
    /// date. The entity model allows a missing due date, but every creation
    /// entry point requires one.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::TitleRequired);
        }
        if self.due_date.is_none() {
            return Err(DraftError::DueDateRequired);
        }
        Ok(())
    }
}
