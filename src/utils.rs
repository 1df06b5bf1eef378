use crate::error::{FleetReportError, Result};
use chrono::{Datelike, Months, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of months in the trailing trend window.
pub const TREND_WINDOW_MONTHS: u32 = 12;

/// A validated reporting period.
///
/// Accepts `"YYYY-MM"` (a single month) or `"YYYY"` (a calendar year). A bare
/// year is anchored at December, so a trailing monthly window ends with the
/// last month of that year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    pub whole_year: bool,
}

impl ReportPeriod {
    pub fn parse(period: &str) -> Result<Self> {
        let trimmed = period.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();

        match parts.len() {
            1 => {
                let year = parse_year(parts[0], period)?;
                Ok(Self {
                    year,
                    month: 12,
                    whole_year: true,
                })
            }
            2 => {
                let year = parse_year(parts[0], period)?;
                if !is_all_digits(parts[1]) {
                    return Err(FleetReportError::InvalidPeriod(period.to_string()));
                }
                let month: u32 = parts[1]
                    .parse()
                    .map_err(|_| FleetReportError::InvalidPeriod(period.to_string()))?;
                validate_month(month)?;
                Ok(Self {
                    year,
                    month,
                    whole_year: false,
                })
            }
            _ => Err(FleetReportError::InvalidPeriod(period.to_string())),
        }
    }

    /// First day of the month the trend window is anchored at.
    pub fn anchor_month_start(&self) -> NaiveDate {
        first_day_of_month(self.year, self.month).unwrap_or(NaiveDate::MIN)
    }

    pub fn start_date(&self) -> NaiveDate {
        let month = if self.whole_year { 1 } else { self.month };
        first_day_of_month(self.year, month).unwrap_or(NaiveDate::MIN)
    }

    pub fn end_date(&self) -> NaiveDate {
        last_day_of_month(self.year, self.month).unwrap_or(NaiveDate::MAX)
    }

    /// Month starts of the trailing window, oldest first, ending at the anchor month.
    pub fn trailing_month_starts(&self) -> Vec<NaiveDate> {
        trailing_month_starts(self.anchor_month_start(), TREND_WINDOW_MONTHS)
    }
}

impl FromStr for ReportPeriod {
    type Err = FleetReportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.whole_year {
            write!(f, "{:04}", self.year)
        } else {
            write!(f, "{:04}-{:02}", self.year, self.month)
        }
    }
}

fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

fn parse_year(raw: &str, period: &str) -> Result<i32> {
    if !is_all_digits(raw) {
        return Err(FleetReportError::InvalidPeriod(period.to_string()));
    }

    let year: i32 = raw
        .parse()
        .map_err(|_| FleetReportError::InvalidPeriod(period.to_string()))?;

    if !(1..=9999).contains(&year) {
        return Err(FleetReportError::InvalidPeriod(period.to_string()));
    }

    Ok(year)
}

pub fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(FleetReportError::InvalidMonth(month));
    }
    Ok(())
}

pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Returns `count` month starts ending at `anchor`, in ascending order.
pub fn trailing_month_starts(anchor: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let anchor = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor);

    // Walk backwards from the anchor, then flip into chronological order.
    let mut months: Vec<NaiveDate> = (0..count)
        .filter_map(|back| anchor.checked_sub_months(Months::new(back)))
        .collect();
    months.reverse();
    months
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Short month label such as `"Mar 2024"`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
