//! Calendar-month and budget-cycle date math.
//!
//! Summaries run over calendar months; the gauge runs over the household's
//! 10th-to-10th budget cycle, which follows payday rather than the calendar.

use chrono::{Datelike, Months, NaiveDate};

/// Inclusive first/last day of the calendar month containing `date`.
pub fn calendar_month(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap();
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap()
        .pred_opt()
        .unwrap();
    (start, end)
}

/// One 10th-to-10th budget cycle: [start, end), both the 10th of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BudgetCycle {
    /// The cycle `today` falls in: if today is past the 9th the cycle starts
    /// on this month's 10th, otherwise on last month's 10th.
    pub fn containing(today: NaiveDate) -> Self {
        let base = if today.day() > 9 {
            today
        } else {
            today.checked_sub_months(Months::new(1)).unwrap()
        };
        let start = base.with_day(10).unwrap();
        let end = start.checked_add_months(Months::new(1)).unwrap();
        Self { start, end }
    }

    /// Whole days from `today` until the cycle end. Negative once the cycle
    /// has ended; callers display it as-is.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        self.end.signed_duration_since(today).num_days()
    }
}
