use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Outcome of coercing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T> {
    Empty,
    Value(T),
    Malformed,
}

impl<T> Parsed<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(value) => Some(value),
            Parsed::Empty | Parsed::Malformed => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Parsed::Malformed)
    }
}

const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub const YEAR_PUBLISHED_MIN: i32 = -4000;
pub const YEAR_PUBLISHED_MAX: i32 = 9999;

pub fn parse_date(raw: &str) -> Parsed<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Parsed::Empty;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    {
        return Parsed::Value(date);
    }
    if let Some(stamp) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Parsed::Value(stamp.date());
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(stamp) => Parsed::Value(stamp.date_naive()),
        Err(_) => Parsed::Malformed,
    }
}

/// Integer cell; accepts a float spelling with no fractional part (`"12.0"`).
pub fn parse_integer(raw: &str) -> Parsed<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Parsed::Empty;
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Parsed::Value(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            Parsed::Value(value as i64)
        }
        _ => Parsed::Malformed,
    }
}

fn parse_bounded<T: TryFrom<i64>>(raw: &str, accept: impl Fn(i64) -> bool) -> Parsed<T> {
    match parse_integer(raw) {
        Parsed::Value(value) if accept(value) => match T::try_from(value) {
            Ok(value) => Parsed::Value(value),
            Err(_) => Parsed::Malformed,
        },
        Parsed::Value(_) | Parsed::Malformed => Parsed::Malformed,
        Parsed::Empty => Parsed::Empty,
    }
}

pub fn parse_rating(raw: &str) -> Parsed<u8> {
    parse_bounded(raw, |value| (0..=5).contains(&value))
}

/// Page count; zero is a placeholder in exports and reads as empty.
pub fn parse_pages(raw: &str) -> Parsed<u32> {
    match parse_bounded(raw, |value| value >= 0) {
        Parsed::Value(0) => Parsed::Empty,
        other => other,
    }
}

pub fn parse_year(raw: &str) -> Parsed<i32> {
    parse_bounded(raw, |value| {
        (i64::from(YEAR_PUBLISHED_MIN)..=i64::from(YEAR_PUBLISHED_MAX)).contains(&value)
    })
}

pub fn parse_read_count(raw: &str) -> Parsed<u32> {
    parse_bounded(raw, |value| value >= 0)
}
