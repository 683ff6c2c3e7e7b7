//! Calendar month representation
//!
//! All analytics are scoped to a single calendar month. `Month` knows its
//! date bounds, its length, and how to step forwards and backwards.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A calendar month, e.g. "2025-01"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month; `month` must be in 1..=12
    ///
    /// The month after it must also be a representable date, since the last
    /// day is found by stepping back from the next month's first day.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1), 1)
        } else {
            (Some(year), month + 1)
        };
        let representable = NaiveDate::from_ymd_opt(year, month, 1).is_some()
            && next_year
                .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
                .is_some();
        if !representable {
            return Err(MonthParseError::OutOfRange(format!("{}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing a date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Constructors guarantee the first day exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in the month (28-31)
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Days of this month that count as "elapsed" when viewed on `today`
    ///
    /// A past month has run its full length and the current month has run up
    /// to today. A future month falls back to `min(today's day, month length)`.
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        let days = self.days_in_month();
        match self.cmp(&Month::containing(today)) {
            Ordering::Less => days,
            Ordering::Equal => today.day(),
            Ordering::Greater => today.day().min(days),
        }
    }

    /// Parse a month string
    ///
    /// Formats: "2025-01", "2025-1", "2025/01"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .or_else(|| s.split_once('/'))
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Ord for Month {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl PartialOrd for Month {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Month::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    OutOfRange(String),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            MonthParseError::OutOfRange(s) => write!(f, "Month out of range: {}", s),
        }
    }
}

impl std::error::Error for MonthParseError {}
