use chrono::{Datelike, Days, NaiveDate};

use crate::model::Task;
use crate::util::date::week_start;

/// How many tasks a calendar cell lists before collapsing the rest into an
/// overflow count
pub const MAX_TASKS_PER_CELL: usize = 3;

/// One day cell in the month grid
#[derive(Debug, PartialEq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    /// False for leading/trailing filler days from adjacent months
    pub in_month: bool,
    /// Tasks due on this date, truncated to [`MAX_TASKS_PER_CELL`]
    pub tasks: Vec<&'a Task>,
    /// How many further tasks were truncated away
    pub overflow: usize,
}

/// A month of whole weeks, Sunday-first. `cells.len()` is always a
/// multiple of 7.
#[derive(Debug, PartialEq)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// The grid split into week rows
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(7)
    }
}

/// Build the month grid for `(year, month)`. Cells from adjacent months are
/// included so every row is a complete week; tasks are bucketed by calendar
/// date only (any time-of-day on the stored value was already dropped on
/// ingest). Filler cells never list tasks.
pub fn month_grid(tasks: &[Task], year: i32, month: u32) -> Option<MonthGrid<'_>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let start = week_start(first);

    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let lead = (first - start).num_days() as u64;
    let days_in_month = (first_of_next - first).num_days() as u64;
    let total = (lead + days_in_month).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(total as usize);
    for offset in 0..total {
        let date = start.checked_add_days(Days::new(offset))?;
        let in_month = date.month() == month && date.year() == year;
        let mut due: Vec<&Task> = if in_month {
            tasks.iter().filter(|t| t.due_date == Some(date)).collect()
        } else {
            Vec::new()
        };
        let overflow = due.len().saturating_sub(MAX_TASKS_PER_CELL);
        due.truncate(MAX_TASKS_PER_CELL);
        cells.push(CalendarCell {
            date,
            in_month,
            tasks: due,
            overflow,
        });
    }

    Some(MonthGrid { year, month, cells })
}
