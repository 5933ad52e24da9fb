//! Calendar math for prize periods.
//!
//! Periods are `length_months` long and tile the calendar forward and
//! backward from an anchor date (the first day of the first season).

use crate::error::{LeagueError, LeagueResult};
use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// First day of the period.
    pub start: NaiveDate,
    /// First day of the next period (exclusive end).
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// The period that contains `today`.
    pub fn containing(anchor: NaiveDate, length_months: u32, today: NaiveDate) -> LeagueResult<Self> {
        if length_months == 0 {
            return Err(LeagueError::invalid("period length must be at least one month"));
        }
        let len = i64::from(length_months);
        let months_apart = i64::from(today.year() - anchor.year()) * 12
            + i64::from(today.month()) - i64::from(anchor.month());
        let mut index = months_apart.div_euclid(len);

        // Day-of-month can push `today` before the estimated start or past its end.
        loop {
            let window = Self::nth(anchor, length_months, index)?;
            if today < window.start {
                index -= 1;
            } else if today >= window.end {
                index += 1;
            } else {
                return Ok(window);
            }
        }
    }

    fn nth(anchor: NaiveDate, length_months: u32, index: i64) -> LeagueResult<Self> {
        let shift = |k: i64| -> LeagueResult<NaiveDate> {
            let months = k * i64::from(length_months);
            let magnitude = u32::try_from(months.unsigned_abs())
                .map_err(|_| LeagueError::invalid("period index out of range"))?;
            let moved = if months >= 0 {
                anchor.checked_add_months(Months::new(magnitude))
            } else {
                anchor.checked_sub_months(Months::new(magnitude))
            };
            moved.ok_or_else(|| LeagueError::invalid("period date out of range"))
        };
        Ok(Self {
            start: shift(index)?,
            end: shift(index + 1)?,
        })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Whole days until the period closes, counting `today`.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end - today).num_days().max(0)
    }

    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
