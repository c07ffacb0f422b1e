//! Time filters for the expenses list.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

/// The day that weeks start on for [ExpenseFilter::ThisWeek].
///
/// This is a fixed convention and does not follow the system locale.
pub const FIRST_DAY_OF_WEEK: Weekday = Weekday::Sunday;

/// Which expenses to show, based on the date they were recorded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseFilter {
    /// Every expense.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Expenses dated on or after the start of the current week.
    #[serde(rename = "week")]
    ThisWeek,
    /// Expenses dated on or after the first day of the current month.
    #[serde(rename = "month")]
    ThisMonth,
}

impl ExpenseFilter {
    /// All filters, in the order they are shown in the filter control.
    pub const ALL: [ExpenseFilter; 3] = [Self::All, Self::ThisWeek, Self::ThisMonth];

    /// The earliest date included by the filter, or `None` if the filter has
    /// no lower bound.
    pub fn start_date(self, today: Date) -> Option<Date> {
        match self {
            Self::All => None,
            Self::ThisWeek => Some(week_start(today)),
            Self::ThisMonth => Some(month_start(today)),
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
        }
    }
}

/// The most recent [FIRST_DAY_OF_WEEK] on or before `today`.
pub fn week_start(today: Date) -> Date {
    let days_into_week = (today.weekday().number_days_from_monday() + 7
        - FIRST_DAY_OF_WEEK.number_days_from_monday())
        % 7;

    today - Duration::days(days_into_week as i64)
}

/// The first day of the month that `today` falls in.
pub fn month_start(today: Date) -> Date {
    today - Duration::days(today.day() as i64 - 1)
}
