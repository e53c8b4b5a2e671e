//! Observation dates. Stored as zero-padded `YYYY-MM-DD` text so that lexical order is
//! chronological order; queries compare them as strings.

use crate::error::AppError;
use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days subtracted from the most recent observation to get the one-year cutoff.
pub const ONE_YEAR_DAYS: i64 = 365;

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"))
}

/// A validated `YYYY-MM-DD` date, kept in its text form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ObsDate(String);

impl ObsDate {
    /// Accepts only exactly `YYYY-MM-DD` naming a real calendar day.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        if !date_shape().is_match(s) {
            return Err(AppError::BadRequest(format!("invalid date '{}': expected YYYY-MM-DD", s)));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| AppError::BadRequest(format!("invalid date '{}': {}", s, e)))?;
        Ok(ObsDate(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain day arithmetic, no calendar-year awareness.
    pub fn minus_days(&self, days: i64) -> Result<Self, AppError> {
        let date = NaiveDate::parse_from_str(&self.0, DATE_FORMAT)
            .map_err(|e| AppError::BadRequest(format!("invalid date '{}': {}", self.0, e)))?;
        let shifted = date
            .checked_sub_signed(Duration::days(days))
            .ok_or_else(|| AppError::BadRequest(format!("date out of range: {} - {} days", self.0, days)))?;
        Ok(ObsDate(shifted.format(DATE_FORMAT).to_string()))
    }

    pub fn one_year_before(&self) -> Result<Self, AppError> {
        self.minus_days(ONE_YEAR_DAYS)
    }
}

impl fmt::Display for ObsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
