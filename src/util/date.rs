use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Parse a due-date value from the wire. The backend sometimes sends a bare
/// date and sometimes a full timestamp; only the calendar date matters to
/// the client, so anything after a `T` is dropped. Unparseable input maps
/// to `None` rather than an error so a bad record cannot break a whole list.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse a server timestamp, tolerating a missing time component
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    parse_due_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// The Sunday on or before `date` (week start = Sunday)
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Whether a due date has passed relative to `today`
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

/// Readable date for list output, e.g. "Jun 1, 2024"
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_abbrev(date.month()), date.day(), date.year())
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn due_date_truncates_timestamps() {
        assert_eq!(parse_due_date("2024-06-01"), Some(d(2024, 6, 1)));
        assert_eq!(parse_due_date("2024-06-01T14:30:00"), Some(d(2024, 6, 1)));
        assert_eq!(parse_due_date("not a date"), None);
    }

    #[test]
    fn timestamp_tolerates_date_only() {
        assert_eq!(
            parse_timestamp("2024-06-01T14:30:00"),
            d(2024, 6, 1).and_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_timestamp("2024-06-01"),
            d(2024, 6, 1).and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("???"), None);
    }

    #[test]
    fn week_start_is_sunday() {
        // 2024-05-15 is a Wednesday
        assert_eq!(week_start(d(2024, 5, 15)), d(2024, 5, 12));
        // A Sunday maps to itself
        assert_eq!(week_start(d(2024, 5, 12)), d(2024, 5, 12));
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        assert!(is_overdue(d(2024, 5, 1), d(2024, 5, 2)));
        assert!(!is_overdue(d(2024, 5, 2), d(2024, 5, 2)));
    }

    #[test]
    fn format_date_is_readable() {
        assert_eq!(format_date(d(2024, 6, 1)), "Jun 1, 2024");
    }
}
