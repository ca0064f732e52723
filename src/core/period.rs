//! Reporting-period resolution - maps a period token to a start-of-window
//! instant anchored to "now" at call time.
//!
//! `week` is a rolling 7-day lookback while `month`, `quarter`, and `year`
//! are calendar-aligned to the period start. The asymmetry is intentional
//! behavioral compatibility with the deployed reporting windows; do not
//! "fix" it without a product decision. The resolved value is only the
//! lower bound - the window is open at the top.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Symbolic reporting-window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Rolling 7-day lookback from now
    Week,
    /// From the first calendar day of the current month
    Month,
    /// From the first day of the current 3-month calendar quarter
    Quarter,
    /// From January 1 of the current year
    Year,
}

impl ReportPeriod {
    /// Canonical wire string for this period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Parses a period token; unrecognized or absent tokens default to
    /// `Month`.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some("week") => Self::Week,
            Some("quarter") => Self::Quarter,
            Some("year") => Self::Year,
            _ => Self::Month,
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Midnight UTC at the start of the given calendar day.
///
/// Day 1 of an existing month is always representable; the fallback arm is
/// unreachable.
fn calendar_day_start(year: i32, month: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map_or(now, |d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Resolves the start instant of the reporting window for `period`,
/// anchored to `now`.
#[must_use]
pub fn resolve_start(period: ReportPeriod, now: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        ReportPeriod::Week => now - Duration::days(7),
        ReportPeriod::Month => calendar_day_start(now.year(), now.month(), now),
        ReportPeriod::Quarter => {
            let quarter_month = ((now.month() - 1) / 3) * 3 + 1;
            calendar_day_start(now.year(), quarter_month, now)
        }
        ReportPeriod::Year => calendar_day_start(now.year(), 1, now),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_week_is_rolling_not_calendar_aligned() {
        let now = instant(2024, 6, 15, 14, 30);
        let start = resolve_start(ReportPeriod::Week, now);
        assert_eq!(start, now - Duration::days(7));
        // Time of day is preserved - this is a rolling lookback
        assert_eq!(start, instant(2024, 6, 8, 14, 30));
    }

    #[test]
    fn test_month_aligns_to_first_of_month_midnight() {
        for day in [1, 15, 30] {
            let now = instant(2024, 6, day, 18, 45);
            let start = resolve_start(ReportPeriod::Month, now);
            assert_eq!(start, instant(2024, 6, 1, 0, 0));
        }
    }

    #[test]
    fn test_quarter_aligns_to_quarter_start() {
        assert_eq!(
            resolve_start(ReportPeriod::Quarter, instant(2024, 2, 20, 9, 0)),
            instant(2024, 1, 1, 0, 0)
        );
        assert_eq!(
            resolve_start(ReportPeriod::Quarter, instant(2024, 6, 15, 9, 0)),
            instant(2024, 4, 1, 0, 0)
        );
        assert_eq!(
            resolve_start(ReportPeriod::Quarter, instant(2024, 9, 30, 9, 0)),
            instant(2024, 7, 1, 0, 0)
        );
        assert_eq!(
            resolve_start(ReportPeriod::Quarter, instant(2024, 12, 1, 9, 0)),
            instant(2024, 10, 1, 0, 0)
        );
    }

    #[test]
    fn test_year_aligns_to_january_first() {
        let now = instant(2024, 8, 7, 12, 0);
        assert_eq!(
            resolve_start(ReportPeriod::Year, now),
            instant(2024, 1, 1, 0, 0)
        );
    }

    #[test]
    fn test_unrecognized_token_defaults_to_month() {
        assert_eq!(ReportPeriod::parse(Some("fortnight")), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse(Some("")), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse(None), ReportPeriod::Month);
    }

    #[test]
    fn test_known_tokens_parse() {
        assert_eq!(ReportPeriod::parse(Some("week")), ReportPeriod::Week);
        assert_eq!(ReportPeriod::parse(Some("month")), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse(Some("quarter")), ReportPeriod::Quarter);
        assert_eq!(ReportPeriod::parse(Some("year")), ReportPeriod::Year);
    }

    #[test]
    fn test_week_crosses_month_boundary() {
        let now = instant(2024, 3, 3, 8, 0);
        assert_eq!(
            resolve_start(ReportPeriod::Week, now),
            instant(2024, 2, 25, 8, 0)
        );
    }
}
