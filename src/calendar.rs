use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Seconds in one day; the latest valid interval end.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A working interval `[from, to)` in seconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingInterval {
    pub from: u32,
    pub to: u32,
}

impl WorkingInterval {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// Interval from whole hours, e.g. `hours(9, 12)`.
    pub fn hours(from: u32, to: u32) -> Self {
        Self::new(from * 3600, to * 3600)
    }
}

/// Weekly working time template.
///
/// Days are stored in the canonical order Sunday..Saturday. A day without
/// intervals is a non-working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    days: [Vec<WorkingInterval>; 7],
}

impl Default for WorkingHours {
    /// Monday to Friday, 9:00-12:00 and 13:00-18:00.
    fn default() -> Self {
        let mut hours = Self::non_working();
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            hours.set_day(
                day,
                vec![WorkingInterval::hours(9, 12), WorkingInterval::hours(13, 18)],
            );
        }
        hours
    }
}

impl WorkingHours {
    pub const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// A template where every day is off.
    pub fn non_working() -> Self {
        Self {
            days: Default::default(),
        }
    }

    /// Replace the intervals of one weekday. Intervals are kept sorted by start.
    pub fn set_day(&mut self, day: Weekday, mut intervals: Vec<WorkingInterval>) {
        intervals.sort_by_key(|iv| iv.from);
        self.days[day.num_days_from_sunday() as usize] = intervals;
    }

    pub fn day(&self, day: Weekday) -> &[WorkingInterval] {
        &self.days[day.num_days_from_sunday() as usize]
    }

    pub fn is_working_day(&self, day: Weekday) -> bool {
        !self.day(day).is_empty()
    }

    /// All seven days in canonical order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[WorkingInterval])> + '_ {
        Self::ALL_WEEKDAYS
            .iter()
            .map(move |day| (*day, self.day(*day)))
    }

    /// Check that every interval is non-empty, within one day and that
    /// intervals of a day do not overlap.
    pub fn validate(&self) -> Result<(), String> {
        for (day, intervals) in self.days() {
            let mut last_end = 0;
            for iv in intervals {
                if iv.from >= iv.to || iv.to > SECONDS_PER_DAY {
                    return Err(format!(
                        "{day}: interval {}..{} is empty or exceeds one day",
                        iv.from, iv.to
                    ));
                }
                if iv.from < last_end {
                    return Err(format!("{day}: overlapping intervals at {}", iv.from));
                }
                last_end = iv.to;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_week_is_monday_to_friday() {
        let hours = WorkingHours::default();
        assert!(!hours.is_working_day(Weekday::Sun));
        assert!(!hours.is_working_day(Weekday::Sat));
        assert_eq!(hours.day(Weekday::Wed).len(), 2);
        assert_eq!(hours.days().next().map(|(d, _)| d), Some(Weekday::Sun));
    }

    #[test]
    fn set_day_sorts_intervals() {
        let mut hours = WorkingHours::non_working();
        hours.set_day(
            Weekday::Sat,
            vec![WorkingInterval::hours(13, 15), WorkingInterval::hours(8, 10)],
        );
        assert_eq!(hours.day(Weekday::Sat)[0], WorkingInterval::hours(8, 10));
        assert!(hours.validate().is_ok());
    }

    #[test]
    fn validate_rejects_overlaps_and_overflow() {
        let mut hours = WorkingHours::non_working();
        hours.set_day(
            Weekday::Mon,
            vec![WorkingInterval::hours(8, 12), WorkingInterval::hours(11, 14)],
        );
        assert!(hours.validate().is_err());

        let mut hours = WorkingHours::non_working();
        hours.set_day(Weekday::Tue, vec![WorkingInterval::new(0, SECONDS_PER_DAY + 1)]);
        assert!(hours.validate().is_err());
    }
}
