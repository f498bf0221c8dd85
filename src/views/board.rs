use crate::model::{Task, TaskStatus};

/// Kanban board: the snapshot partitioned by workflow status. Tasks whose
/// status the client does not recognize land in `unknown` rather than being
/// dropped, so nothing silently disappears from the board.
#[derive(Debug, Default, PartialEq)]
pub struct Board<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub review: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
    pub unknown: Vec<&'a Task>,
}

impl<'a> Board<'a> {
    /// Column accessor for iteration in display order
    pub fn columns(&self) -> [(&'static str, &[&'a Task]); 5] {
        [
            ("To do", &self.todo),
            ("In progress", &self.in_progress),
            ("Review", &self.review),
            ("Done", &self.done),
            ("Unknown", &self.unknown),
        ]
    }
}

/// Partition the snapshot into board columns, preserving snapshot order
/// within each column
pub fn board(tasks: &[Task]) -> Board<'_> {
    let mut out = Board::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => out.todo.push(task),
            TaskStatus::InProgress => out.in_progress.push(task),
            TaskStatus::Review => out.review.push(task),
            TaskStatus::Done => out.done.push(task),
            TaskStatus::Unknown => out.unknown.push(task),
        }
    }
    out
}
