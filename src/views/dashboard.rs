//! Dashboard projections: the recent-tasks widget, the completion badges,
//! and the weekly activity histogram. All pure reads of the store snapshot;
//! `today` is passed in so the cutoffs are testable.

use chrono::{Datelike, NaiveDate};

use crate::model::{Task, TaskStatus};
use crate::util::date::week_start;

/// How many tasks the dashboard's recent-tasks widget shows
pub const RECENT_LIMIT: usize = 2;

/// The nearest-due tasks, ascending by due date. The sort is stable, so
/// tasks sharing a due date keep their snapshot order; tasks without a due
/// date sort last.
pub fn recent_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

/// Counts for the dashboard summary badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    /// Todo tasks due today or later
    pub upcoming: usize,
    pub in_progress: usize,
    pub done: usize,
}

pub fn completion_stats(tasks: &[Task], today: NaiveDate) -> CompletionStats {
    let mut stats = CompletionStats::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => {
                if task.due_date.is_some_and(|d| d >= today) {
                    stats.upcoming += 1;
                }
            }
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Done => stats.done += 1,
            _ => {}
        }
    }
    stats
}

/// Tasks due in the current week (Sunday through `today`), bucketed by
/// weekday. Index 0 is Sunday.
pub fn weekly_activity(tasks: &[Task], today: NaiveDate) -> [usize; 7] {
    let start = week_start(today);
    let mut counts = [0usize; 7];
    for task in tasks {
        if let Some(due) = task.due_date
            && due >= start
            && due <= today
        {
            counts[due.weekday().num_days_from_sunday() as usize] += 1;
        }
    }
    counts
}

/// Completed/incomplete totals shown beside the activity chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityTotals {
    pub completed: usize,
    pub incomplete: usize,
}

pub fn activity_totals(tasks: &[Task]) -> ActivityTotals {
    let completed = tasks.iter().filter(|t| t.completed).count();
    ActivityTotals {
        completed,
        incomplete: tasks.len() - completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn due_task(id: i64, date: Option<NaiveDate>) -> Task {
        let mut t = Task::new(format!("t{}", id));
        t.id = Some(id);
        t.due_date = date;
        t
    }

    #[test]
    fn recent_tasks_sorts_ascending_and_takes_two() {
        let tasks = vec![
            due_task(1, Some(d(2024, 5, 1))),
            due_task(2, Some(d(2024, 5, 10))),
            due_task(3, Some(d(2024, 4, 20))),
        ];
        let recent = recent_tasks(&tasks);
        let dates: Vec<_> = recent.iter().map(|t| t.due_date.unwrap()).collect();
        assert_eq!(dates, vec![d(2024, 4, 20), d(2024, 5, 1)]);
    }

    #[test]
    fn recent_tasks_ties_keep_snapshot_order() {
        let tasks = vec![
            due_task(1, Some(d(2024, 5, 1))),
            due_task(2, Some(d(2024, 5, 1))),
        ];
        let recent = recent_tasks(&tasks);
        assert_eq!(recent[0].id, Some(1));
        assert_eq!(recent[1].id, Some(2));
    }

    #[test]
    fn recent_tasks_undated_sort_last() {
        let tasks = vec![due_task(1, None), due_task(2, Some(d(2024, 5, 1)))];
        let recent = recent_tasks(&tasks);
        assert_eq!(recent[0].id, Some(2));
        assert_eq!(recent[1].id, Some(1));
    }

    #[test]
    fn completion_stats_counts_by_status_and_cutoff() {
        let today = d(2024, 5, 15);
        let mut overdue_todo = due_task(1, Some(d(2024, 5, 1)));
        overdue_todo.status = TaskStatus::Todo;
        let mut upcoming_todo = due_task(2, Some(d(2024, 5, 15)));
        upcoming_todo.status = TaskStatus::Todo;
        let mut in_progress = due_task(3, Some(d(2024, 5, 20)));
        in_progress.status = TaskStatus::InProgress;
        let mut done = due_task(4, None);
        done.set_status(TaskStatus::Done);

        let stats =
            completion_stats(&[overdue_todo, upcoming_todo, in_progress, done], today);
        assert_eq!(
            stats,
            CompletionStats {
                upcoming: 1,
                in_progress: 1,
                done: 1
            }
        );
    }

    #[test]
    fn weekly_activity_buckets_current_week_only() {
        // 2024-05-15 is a Wednesday; week runs from Sunday 2024-05-12
        let today = d(2024, 5, 15);
        let tasks = vec![
            due_task(1, Some(d(2024, 5, 12))), // Sunday
            due_task(2, Some(d(2024, 5, 13))), // Monday
            due_task(3, Some(d(2024, 5, 13))), // Monday
            due_task(4, Some(d(2024, 5, 16))), // Thursday, after today
            due_task(5, Some(d(2024, 5, 5))),  // previous week
        ];
        let counts = weekly_activity(&tasks, today);
        assert_eq!(counts, [1, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn activity_totals_split_on_completed_flag() {
        let mut done = due_task(1, None);
        done.set_status(TaskStatus::Done);
        let open = due_task(2, None);

        let totals = activity_totals(&[done, open]);
        assert_eq!(
            totals,
            ActivityTotals {
                completed: 1,
                incomplete: 1
            }
        );
    }
}
