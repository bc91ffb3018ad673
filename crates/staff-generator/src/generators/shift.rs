//! Check-in/check-out times for one attendance day.

use chrono::NaiveTime;
use rand::Rng;
use rust_decimal::Decimal;
use staff_core::AttendanceStatus;

/// Earliest regular check-in, minutes after midnight (08:00).
pub const SHIFT_START_MINUTES: u32 = 8 * 60;
/// Late check-ins are capped at 10:30.
pub const LATEST_CHECK_IN_MINUTES: u32 = 10 * 60 + 30;
/// A regular day is eight hours.
pub const REGULAR_MINUTES: u32 = 8 * 60;
pub const MAX_WORKED_MINUTES: u32 = 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkShift {
    pub check_in: NaiveTime,
    pub check_out: NaiveTime,
    pub overtime_hours: Decimal,
}

/// Times for a day with the given outcome; `None` unless present or late.
pub fn work_shift<R: Rng + ?Sized>(rng: &mut R, status: AttendanceStatus) -> Option<WorkShift> {
    if !status.has_clock_times() {
        return None;
    }

    let mut check_in = SHIFT_START_MINUTES + rng.random_range(0..60);
    if status == AttendanceStatus::Late {
        check_in = (check_in + 60).min(LATEST_CHECK_IN_MINUTES);
    }

    let worked = rng.random_range(REGULAR_MINUTES..=MAX_WORKED_MINUTES);
    let check_out = check_in + worked;

    Some(WorkShift {
        check_in: clock(check_in)?,
        check_out: clock(check_out)?,
        overtime_hours: overtime_hours(worked),
    })
}

/// Hours beyond the regular day, two decimals.
pub fn overtime_hours(worked_minutes: u32) -> Decimal {
    let extra = worked_minutes.saturating_sub(REGULAR_MINUTES);
    Decimal::new(i64::from(extra * 100 / 60), 2)
}

fn clock(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_only_worked_days_have_times() {
        let mut rng = StdRng::seed_from_u64(42);
        for status in AttendanceStatus::ALL {
            let shift = work_shift(&mut rng, *status);
            assert_eq!(shift.is_some(), status.has_clock_times(), "{status}");
        }
    }

    #[test]
    fn test_check_out_after_check_in() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            for status in [AttendanceStatus::Present, AttendanceStatus::Late] {
                let shift = work_shift(&mut rng, status).unwrap();
                assert!(shift.check_out > shift.check_in);

                let worked = (shift.check_out - shift.check_in).num_minutes();
                assert!((480..=600).contains(&worked));
                assert!(shift.overtime_hours >= Decimal::ZERO);
                assert!(shift.overtime_hours <= Decimal::new(200, 2));
            }
        }
    }

    #[test]
    fn test_late_check_in_shifted_and_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let cap = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        for _ in 0..500 {
            let shift = work_shift(&mut rng, AttendanceStatus::Late).unwrap();
            assert!(shift.check_in >= nine);
            assert!(shift.check_in <= cap);
        }
    }

    #[test]
    fn test_overtime_hours() {
        assert_eq!(overtime_hours(480), Decimal::ZERO);
        assert_eq!(overtime_hours(570), Decimal::new(150, 2));
        assert_eq!(overtime_hours(600), Decimal::new(200, 2));
        assert_eq!(overtime_hours(300), Decimal::ZERO);
    }
}
