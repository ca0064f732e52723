//! Freshness classification - derives a three-state status from two dates.
//!
//! The classifier is a pure function over calendar dates: working in whole
//! days (`NaiveDate`) already excludes time-of-day noise, so "today" always
//! compares as a whole day boundary. It is invoked at exactly two call
//! sites: when an item is created (to set the stored snapshot) and whenever
//! items are listed (to overwrite the snapshot with a live value). The
//! stored column is never trusted as ground truth.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days-until-expiry at or below which an item counts as expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 3;

/// Freshness classification of a perishable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreshnessStatus {
    /// More than three days until expiry
    Fresh,
    /// Expires today or within the next three days
    ExpiringSoon,
    /// Expiry date is in the past
    Expired,
}

impl FreshnessStatus {
    /// Canonical wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ExpiringSoon => "expiring-soon",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days from `reference` until `expiry`; negative once expired.
#[must_use]
pub fn days_until(expiry: NaiveDate, reference: NaiveDate) -> i64 {
    (expiry - reference).num_days()
}

/// Classifies an item by its expiry date relative to `reference`.
///
/// Day zero (expiry exactly on the reference date) is `ExpiringSoon`, as is
/// the inclusive three-day boundary; one day past expiry is `Expired`.
#[must_use]
pub fn classify(expiry: NaiveDate, reference: NaiveDate) -> FreshnessStatus {
    let days = days_until(expiry, reference);
    if days < 0 {
        FreshnessStatus::Expired
    } else if days <= EXPIRING_SOON_WINDOW_DAYS {
        FreshnessStatus::ExpiringSoon
    } else {
        FreshnessStatus::Fresh
    }
}

/// Classifies an item against the current UTC date.
#[must_use]
pub fn classify_today(expiry: NaiveDate) -> FreshnessStatus {
    classify(expiry, chrono::Utc::now().date_naive())
}
