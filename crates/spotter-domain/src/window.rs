//! Time window selector - which results count as the "current period"

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How a window was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Twelve months back from today (January through March)
    Rolling12Months,
    /// January 1 through December 31 of the current year
    CalendarYear,
    /// The full previous calendar year, used only as a fallback
    PreviousYear,
}

/// Inclusive date range a cohort is restricted to
///
/// "All-time" is represented by the absence of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
    /// Rule that produced the range
    pub mode: WindowMode,
}

impl DateWindow {
    /// Canonical current-period window for `today`
    ///
    /// Early in the year too few results exist for a fair current-year
    /// ranking, so January through March use a rolling twelve months.
    pub fn resolve(today: NaiveDate) -> Self {
        if today.month() <= 3 {
            let start = today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN);
            return Self {
                start,
                end: today,
                mode: WindowMode::Rolling12Months,
            };
        }

        let (start, end) = calendar_year(today.year());
        Self {
            start,
            end,
            mode: WindowMode::CalendarYear,
        }
    }

    /// Fallback window: the whole calendar year before `today`'s year
    pub fn previous_year(today: NaiveDate) -> Self {
        let (start, end) = calendar_year(today.year() - 1);
        Self {
            start,
            end,
            mode: WindowMode::PreviousYear,
        }
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether this window is the fallback rather than the current period
    pub fn is_fallback(&self) -> bool {
        self.mode == WindowMode::PreviousYear
    }
}

fn calendar_year(year: i32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_february_is_rolling() {
        let window = DateWindow::resolve(date(2025, 2, 15));
        assert_eq!(window.mode, WindowMode::Rolling12Months);
        assert_eq!(window.start, date(2024, 2, 15));
        assert_eq!(window.end, date(2025, 2, 15));
    }

    #[test]
    fn test_may_is_calendar_year() {
        let window = DateWindow::resolve(date(2025, 5, 1));
        assert_eq!(window.mode, WindowMode::CalendarYear);
        assert_eq!(window.start, date(2025, 1, 1));
        assert_eq!(window.end, date(2025, 12, 31));
    }

    #[test]
    fn test_march_boundary() {
        assert_eq!(DateWindow::resolve(date(2025, 3, 31)).mode, WindowMode::Rolling12Months);
        assert_eq!(DateWindow::resolve(date(2025, 4, 1)).mode, WindowMode::CalendarYear);
    }

    #[test]
    fn test_leap_day_rolls_back_to_month_end() {
        let window = DateWindow::resolve(date(2024, 2, 29));
        assert_eq!(window.start, date(2023, 2, 28));
    }

    #[test]
    fn test_previous_year_is_full_year() {
        let window = DateWindow::previous_year(date(2025, 2, 15));
        assert!(window.is_fallback());
        assert!(window.contains(date(2024, 1, 1)));
        assert!(window.contains(date(2024, 12, 31)));
        assert!(!window.contains(date(2025, 1, 1)));
    }
}
