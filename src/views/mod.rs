//! Pure view projections over the task store snapshot. None of these
//! mutate anything; every caller re-derives on each read so there is no
//! per-view cache to fall out of date.

pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod explorer;

pub use board::{Board, board};
pub use calendar::{CalendarCell, MonthGrid, month_grid};
pub use dashboard::{
    ActivityTotals, CompletionStats, activity_totals, completion_stats, recent_tasks,
    weekly_activity,
};
pub use explorer::{ExplorerState, TaskGroup, explorer_groups};
