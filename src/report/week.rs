use chrono::{Datelike, Duration, NaiveDate};

/// Monday-through-Sunday window around a reference date. All weekly
/// aggregation filters against this inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn containing(today: NaiveDate) -> Self {
        let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The seven days of the window in order, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |offset| start + Duration::days(offset))
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d, %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn window_starts_on_monday_and_ends_on_sunday() {
        // 2024-03-15 is a Friday.
        let window = WeekWindow::containing(date(2024, 3, 15));
        assert_eq!(window.start, date(2024, 3, 11));
        assert_eq!(window.end, date(2024, 3, 17));
    }

    #[test]
    fn monday_and_sunday_map_to_the_same_window() {
        let monday = WeekWindow::containing(date(2024, 3, 11));
        let sunday = WeekWindow::containing(date(2024, 3, 17));
        assert_eq!(monday, sunday);
        assert_eq!(monday.start.weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn window_crosses_month_boundaries() {
        // 2024-04-01 is a Monday; the prior Sunday was 2024-03-31.
        let window = WeekWindow::containing(date(2024, 3, 31));
        assert_eq!(window.start, date(2024, 3, 25));
        assert_eq!(window.end, date(2024, 3, 31));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let window = WeekWindow::containing(date(2024, 3, 13));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::days(1)));
        assert!(!window.contains(window.end + Duration::days(1)));
    }

    #[test]
    fn days_yields_seven_consecutive_dates() {
        let window = WeekWindow::containing(date(2024, 3, 13));
        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], window.start);
        assert_eq!(days[6], window.end);
    }
}
