//! Utility functions for the recycle_forecast crate

use chrono::NaiveDate;

/// Full-date layouts accepted for the month column
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a month stamp into the first day of that month
///
/// Accepts the dataset's native `YYYY / MM` form as well as `YYYY/MM`,
/// `YYYY-MM`, `YYYY-MM-DD` and `MM/DD/YYYY`. Full dates keep their day.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    let separator = if trimmed.contains('/') { '/' } else { '-' };
    let mut parts = trimmed.split(separator).map(str::trim);
    let year = parts.next()?;
    let month = parts.next()?;
    if parts.next().is_some() || year.len() != 4 {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Lowercase `raw` and strip every whitespace character
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical text of a community-district number
///
/// Numeric values lose leading zeros ("01" becomes "1"); anything else is
/// returned trimmed.
pub fn normalize_district_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(number) => number.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Every calendar day from `start` to `end`, both inclusive
pub fn daily_calendar(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
