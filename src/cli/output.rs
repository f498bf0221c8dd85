use serde::Serialize;

use crate::model::{Task, TaskPriority, TaskStatus};
use crate::util::date::format_date;
use crate::views::{Board, CompletionStats, MonthGrid};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: Option<i64>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl From<&Task> for TaskJson {
    fn from(task: &Task) -> Self {
        TaskJson {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date.map(|d| d.to_string()),
            completed: task.completed,
            description: task.description.clone(),
            category_id: task.category_id,
        }
    }
}

#[derive(Serialize)]
pub struct BoardJson {
    pub todo: Vec<TaskJson>,
    pub in_progress: Vec<TaskJson>,
    pub review: Vec<TaskJson>,
    pub done: Vec<TaskJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<TaskJson>,
}

impl From<&Board<'_>> for BoardJson {
    fn from(board: &Board<'_>) -> Self {
        let conv = |tasks: &[&Task]| tasks.iter().copied().map(TaskJson::from).collect();
        BoardJson {
            todo: conv(&board.todo),
            in_progress: conv(&board.in_progress),
            review: conv(&board.review),
            done: conv(&board.done),
            unknown: conv(&board.unknown),
        }
    }
}

#[derive(Serialize)]
pub struct CalendarCellJson {
    pub date: String,
    pub in_month: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskJson>,
    #[serde(skip_serializing_if = "is_zero")]
    pub overflow: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Serialize)]
pub struct CalendarJson {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarCellJson>>,
}

impl From<&MonthGrid<'_>> for CalendarJson {
    fn from(grid: &MonthGrid<'_>) -> Self {
        CalendarJson {
            year: grid.year,
            month: grid.month,
            weeks: grid
                .weeks()
                .map(|week| {
                    week.iter()
                        .map(|cell| CalendarCellJson {
                            date: cell.date.to_string(),
                            in_month: cell.in_month,
                            tasks: cell.tasks.iter().copied().map(TaskJson::from).collect(),
                            overflow: cell.overflow,
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsJson {
    pub upcoming: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl From<CompletionStats> for StatsJson {
    fn from(stats: CompletionStats) -> Self {
        StatsJson {
            upcoming: stats.upcoming,
            in_progress: stats.in_progress,
            done: stats.done,
        }
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

/// One task as a list line: `  12  [>] Fix login form  (due Jun 1, 2024)`
pub fn task_line(task: &Task) -> String {
    let marker = match task.status {
        TaskStatus::Todo => ' ',
        TaskStatus::InProgress => '>',
        TaskStatus::Review => '?',
        TaskStatus::Done => 'x',
        TaskStatus::Unknown => '!',
    };
    let id = task
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let due = task
        .due_date
        .map(|d| format!("  (due {})", format_date(d)))
        .unwrap_or_default();
    format!("  {:>4}  [{}] {}{}", id, marker, task.title, due)
}
