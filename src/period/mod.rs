//! Reporting periods and the calendar ranges they resolve to.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AnalyticsError, Result};

/// Half-open calendar range `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(AnalyticsError::InvalidPeriod(format!(
                "range end {} must be after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Named reporting period, anchored to a reference instant on resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Period::Custom { start, end }
    }

    pub fn label(&self) -> String {
        match self {
            Period::Weekly => "Weekly".into(),
            Period::Monthly => "Monthly".into(),
            Period::Yearly => "Yearly".into(),
            Period::Custom { start, end } => format!("Custom ({} .. {})", start, end),
        }
    }

    /// Resolves the period against `now`, using its UTC calendar day.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateRange> {
        self.resolve_on(now.date_naive())
    }

    /// Resolves the period against a calendar day.
    ///
    /// Weekly starts on Monday, Monthly on day 1 and Yearly on January 1.
    pub fn resolve_on(&self, today: NaiveDate) -> Result<DateRange> {
        let unit = match self {
            Period::Weekly => PeriodUnit::Week,
            Period::Monthly => PeriodUnit::Month,
            Period::Yearly => PeriodUnit::Year,
            Period::Custom { start, end } => return DateRange::new(*start, *end),
        };
        let start = unit.anchor(today).ok_or_else(|| out_of_range(today))?;
        let end = unit.advance(start).ok_or_else(|| out_of_range(today))?;
        DateRange::new(start, end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            "yearly" | "year" => Ok(Period::Yearly),
            _ => Err(AnalyticsError::UnknownPeriod(value.to_string())),
        }
    }
}

fn out_of_range(date: NaiveDate) -> AnalyticsError {
    AnalyticsError::InvalidPeriod(format!("no calendar range available around {}", date))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodUnit {
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    fn anchor(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            PeriodUnit::Week => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date.checked_sub_signed(Duration::days(delta))
            }
            PeriodUnit::Month => date.with_day(1),
            PeriodUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    fn advance(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            PeriodUnit::Week => start.checked_add_signed(Duration::weeks(1)),
            PeriodUnit::Month => shift_month(start, 1),
            PeriodUnit::Year => NaiveDate::from_ymd_opt(start.year() + 1, start.month(), 1),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}
