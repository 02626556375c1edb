use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Working week of the workshop. Saturdays and Sundays never count as
/// effort days; there is no holiday list in this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    non_working_days: HashSet<Weekday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }
}

impl WorkCalendar {
    /// Check if a date counts as a working day
    pub fn is_workday(&self, date: NaiveDate) -> bool {
        !self.non_working_days.contains(&date.weekday())
    }

    /// Find the date N working days ahead of `from`.
    ///
    /// Advances one calendar day at a time; only working days decrement the
    /// counter, weekend days are stepped over without counting. The start
    /// date itself is never checked.
    pub fn advance_workdays(&self, from: NaiveDate, days_ahead: i64) -> NaiveDate {
        let mut current = from;
        let mut count = 0;

        while count < days_ahead {
            current = current + Duration::days(1);
            if self.is_workday(current) {
                count += 1;
            }
        }
        current
    }
}
