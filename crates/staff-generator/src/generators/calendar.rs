//! Date helpers: bounded random dates and business-day windows.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;

/// Uniform date in `[start, end]`. Returns `start` when the range is empty.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    start + Duration::days(rng.random_range(0..=span))
}

/// `start` plus a uniform number of days in `[min_days, max_days]`.
pub fn days_after<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    min_days: i64,
    max_days: i64,
) -> NaiveDate {
    let days = if max_days > min_days {
        rng.random_range(min_days..=max_days)
    } else {
        min_days
    };
    start + Duration::days(days)
}

/// Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending on `end` (inclusive). Zero days gives
    /// an empty window. Clamped at the earliest representable date.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// The single day immediately before this window, if one exists.
    pub fn day_before(&self) -> Option<NaiveDate> {
        self.start.pred_opt()
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Weekdays in the window, oldest first.
    pub fn business_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start
            .iter_days()
            .take_while(move |d| *d <= end)
            .filter(|d| is_business_day(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_between_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = ymd(2024, 1, 1);
        let end = ymd(2024, 3, 31);
        for _ in 0..200 {
            let date = date_between(&mut rng, start, end);
            assert!(start <= date && date <= end);
        }
        assert_eq!(date_between(&mut rng, end, start), end);
    }

    #[test]
    fn test_days_after_strictly_later() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = ymd(2024, 6, 1);
        for _ in 0..200 {
            let end = days_after(&mut rng, start, 30, 365);
            let span = (end - start).num_days();
            assert!((30..=365).contains(&span));
        }
    }

    #[test]
    fn test_business_days() {
        // 2024-06-03 is a Monday.
        let window = DateWindow::new(ymd(2024, 6, 1), ymd(2024, 6, 9));
        let days: Vec<_> = window.business_days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], ymd(2024, 6, 3));
        assert_eq!(days[4], ymd(2024, 6, 7));
        assert!(days.iter().all(|d| is_business_day(*d)));
    }

    #[test]
    fn test_trailing_window() {
        let end = ymd(2024, 12, 31);
        let window = DateWindow::trailing(end, 365);
        assert_eq!(window.start, ymd(2024, 1, 2));
        assert_eq!(window.end, end);
        assert!(window.contains(ymd(2024, 7, 1)));
        assert!(!window.contains(ymd(2024, 1, 1)));
        assert_eq!(window.day_before(), Some(ymd(2024, 1, 1)));

        let empty = DateWindow::trailing(end, 0);
        assert!(empty.is_empty());
        assert_eq!(empty.business_days().count(), 0);
    }

    #[test]
    fn test_trailing_window_clamped_at_min_date() {
        let end = ymd(2024, 12, 31);
        let window = DateWindow::trailing(end, u32::MAX);
        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.end, end);
        assert_eq!(window.day_before(), None);
    }
}
