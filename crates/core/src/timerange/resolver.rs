//! Duration keyword and explicit-date resolution.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RangeError;

/// Supported duration keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKeyword {
    /// From the 1st of the current month through now (a growing window).
    #[default]
    CurrentMonth,
    /// The full previous calendar month.
    LastMonth,
    /// From January 1 of the current year through now.
    CurrentYear,
}

impl DurationKeyword {
    /// Parses a keyword, falling back to `current_month` for unknown or
    /// absent values.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("last_month") => Self::LastMonth,
            Some("current_year") => Self::CurrentYear,
            _ => Self::CurrentMonth,
        }
    }
}

/// Raw range parameters as submitted by the collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    /// Explicit start date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Explicit end date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Duration keyword, used when explicit dates are not both present.
    pub duration: Option<String>,
}

/// A resolved inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedRange {
    /// Inclusive start instant.
    pub start: NaiveDateTime,
    /// Inclusive end instant.
    pub end: NaiveDateTime,
}

impl ResolvedRange {
    /// Resolves a query against an explicit `now`.
    ///
    /// Explicit dates win over any duration keyword when both bounds are
    /// present; the end bound is widened to the last second of its day so
    /// a single-day range covers the whole day.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::InvalidDate` for malformed explicit dates and
    /// `RangeError::InvalidRange` when start is after end.
    pub fn resolve(query: &RangeQuery, now: NaiveDateTime) -> Result<Self, RangeError> {
        if let (Some(start_raw), Some(end_raw)) = (&query.start_date, &query.end_date) {
            let start = parse_date(start_raw)?;
            let end = parse_date(end_raw)?;
            if start > end {
                return Err(RangeError::InvalidRange {
                    start: start_raw.clone(),
                    end: end_raw.clone(),
                });
            }
            return Ok(Self {
                start: day_start(start)?,
                end: day_end(end)?,
            });
        }

        let keyword = DurationKeyword::parse(query.duration.as_deref());
        Self::from_keyword(keyword, now)
    }

    /// Resolves a query against the wall clock.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::resolve`].
    pub fn resolve_now(query: &RangeQuery) -> Result<Self, RangeError> {
        Self::resolve(query, Utc::now().naive_utc())
    }

    /// Resolves a duration keyword against an explicit `now`.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Internal` only if calendar arithmetic fails,
    /// which cannot happen for well-formed `now` values.
    pub fn from_keyword(keyword: DurationKeyword, now: NaiveDateTime) -> Result<Self, RangeError> {
        let today = now.date();
        match keyword {
            DurationKeyword::CurrentMonth => {
                let first = month_start(today.year(), today.month())?;
                Ok(Self {
                    start: day_start(first)?,
                    end: now,
                })
            }
            DurationKeyword::LastMonth => {
                let (year, month) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                let first = month_start(year, month)?;
                let last = month_start(today.year(), today.month())?
                    .checked_sub_days(Days::new(1))
                    .ok_or_else(|| RangeError::Internal("month underflow".to_string()))?;
                Ok(Self {
                    start: day_start(first)?,
                    end: day_end(last)?,
                })
            }
            DurationKeyword::CurrentYear => {
                let first = month_start(today.year(), 1)?;
                Ok(Self {
                    start: day_start(first)?,
                    end: now,
                })
            }
        }
    }

    /// The start date in `YYYY-MM-DD` form, echoed back to callers.
    #[must_use]
    pub fn start_date(&self) -> String {
        self.start.date().format("%Y-%m-%d").to_string()
    }

    /// The end date in `YYYY-MM-DD` form, echoed back to callers.
    #[must_use]
    pub fn end_date(&self) -> String {
        self.end.date().format("%Y-%m-%d").to_string()
    }

    /// Returns true if the instant falls inside the range.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }

    /// Returns true if any instant of the given day falls inside the range.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start.date() && date <= self.end.date()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RangeError::InvalidDate(raw.to_string()))
}

fn month_start(year: i32, month: u32) -> Result<NaiveDate, RangeError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RangeError::Internal(format!("invalid month {year}-{month:02}")))
}

fn day_start(date: NaiveDate) -> Result<NaiveDateTime, RangeError> {
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| RangeError::Internal(format!("invalid day start for {date}")))
}

fn day_end(date: NaiveDate) -> Result<NaiveDateTime, RangeError> {
    date.and_hms_opt(23, 59, 59)
        .ok_or_else(|| RangeError::Internal(format!("invalid day end for {date}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn query(start: Option<&str>, end: Option<&str>, duration: Option<&str>) -> RangeQuery {
        RangeQuery {
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            duration: duration.map(str::to_string),
        }
    }

    #[rstest::rstest]
    #[case(None, DurationKeyword::CurrentMonth)]
    #[case(Some("current_month"), DurationKeyword::CurrentMonth)]
    #[case(Some("last_month"), DurationKeyword::LastMonth)]
    #[case(Some("current_year"), DurationKeyword::CurrentYear)]
    #[case(Some("fortnight"), DurationKeyword::CurrentMonth)]
    fn test_keyword_parsing(#[case] input: Option<&str>, #[case] expected: DurationKeyword) {
        assert_eq!(DurationKeyword::parse(input), expected);
    }

    #[test]
    fn test_current_month_is_live_window() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range =
            ResolvedRange::resolve(&query(None, None, Some("current_month")), now).unwrap();
        assert_eq!(range.start, at(2025, 3, 1, 0, 0, 0));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_last_month_full_calendar_month() {
        // Called on 2025-03-14: full February range
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("last_month")), now).unwrap();
        assert_eq!(range.start, at(2025, 2, 1, 0, 0, 0));
        assert_eq!(range.end, at(2025, 2, 28, 23, 59, 59));
    }

    #[test]
    fn test_last_month_january_rolls_back_a_year() {
        let now = at(2025, 1, 10, 8, 0, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("last_month")), now).unwrap();
        assert_eq!(range.start, at(2024, 12, 1, 0, 0, 0));
        assert_eq!(range.end, at(2024, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_last_month_leap_february() {
        let now = at(2024, 3, 5, 12, 0, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("last_month")), now).unwrap();
        assert_eq!(range.end, at(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_current_year_from_january_first() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("current_year")), now).unwrap();
        assert_eq!(range.start, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_unknown_keyword_falls_back_to_current_month() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("fortnight")), now).unwrap();
        assert_eq!(range.start, at(2025, 3, 1, 0, 0, 0));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_absent_duration_defaults_to_current_month() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, None), now).unwrap();
        assert_eq!(range.start, at(2025, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_explicit_dates_win_over_keyword() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(
            &query(Some("2025-01-05"), Some("2025-01-10"), Some("current_year")),
            now,
        )
        .unwrap();
        assert_eq!(range.start, at(2025, 1, 5, 0, 0, 0));
        assert_eq!(range.end, at(2025, 1, 10, 23, 59, 59));
    }

    #[test]
    fn test_single_day_range_covers_whole_day() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(
            &query(Some("2025-01-05"), Some("2025-01-05"), None),
            now,
        )
        .unwrap();
        assert_eq!(range.start, at(2025, 1, 5, 0, 0, 0));
        assert_eq!(range.end, at(2025, 1, 5, 23, 59, 59));
    }

    #[test]
    fn test_reversed_explicit_range_rejected() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let err = ResolvedRange::resolve(
            &query(Some("2025-01-10"), Some("2025-01-05"), None),
            now,
        )
        .unwrap_err();
        assert!(matches!(err, RangeError::InvalidRange { .. }));
        assert_eq!(err.error_code(), "INVALID_RANGE");
    }

    #[test]
    fn test_malformed_date_rejected() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let err = ResolvedRange::resolve(
            &query(Some("2025-13-40"), Some("2025-01-05"), None),
            now,
        )
        .unwrap_err();
        assert!(matches!(err, RangeError::InvalidDate(_)));
    }

    #[test]
    fn test_date_echo_formats() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("last_month")), now).unwrap();
        assert_eq!(range.start_date(), "2025-02-01");
        assert_eq!(range.end_date(), "2025-02-28");
    }

    #[test]
    fn test_contains() {
        let now = at(2025, 3, 14, 10, 30, 0);
        let range = ResolvedRange::resolve(&query(None, None, Some("last_month")), now).unwrap();
        assert!(range.contains(at(2025, 2, 14, 12, 0, 0)));
        assert!(!range.contains(at(2025, 3, 1, 0, 0, 0)));
        assert!(range.contains_date(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!range.contains_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
    }
}
