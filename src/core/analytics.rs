//! Waste analytics - grouped summaries of a user's waste records within a
//! reporting window.
//!
//! The aggregation is a single query-then-compute pass: resolve the window
//! start, select the matching records, then fold them into per-food-type
//! groups each carrying per-reason breakdowns. Group order is discovery
//! order, not sorted. An empty record set is a legitimate empty report;
//! store failures propagate as errors and are never converted into one.

use crate::{
    core::period::{self, ReportPeriod},
    entities::{WasteRecord, waste_record},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::prelude::*;
use serde::Serialize;

/// Per-reason sums within one food-type group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonBreakdown {
    /// Discard reason shared by the records in this bucket
    pub reason: String,
    /// Sum of quantities
    pub quantity: f64,
    /// Sum of costs
    pub cost: f64,
    /// Number of records
    pub count: u64,
}

/// All waste for one food type within the window, broken down by reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodTypeBreakdown {
    /// Food type shared by the records in this group
    pub food_type: String,
    /// One entry per reason seen within this food type, discovery order
    pub reasons: Vec<ReasonBreakdown>,
    /// Sum of quantities across all reasons
    pub total_quantity: f64,
    /// Sum of costs across all reasons
    pub total_cost: f64,
    /// Number of records across all reasons
    pub total_entries: u64,
}

/// Zero-key aggregate over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteSummary {
    /// Sum of quantities
    pub total_quantity: f64,
    /// Sum of costs
    pub total_cost: f64,
    /// Number of records
    pub count: u64,
}

/// A complete analytics report for one user and period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteAnalytics {
    /// The period token the report was requested for
    pub period: ReportPeriod,
    /// Resolved start of the reporting window
    pub start_date: DateTime<Utc>,
    /// Per-food-type groups, discovery order; empty when no records matched
    pub groups: Vec<FoodTypeBreakdown>,
}

/// Sums quantity, cost, and count over `records` with no grouping. This is
/// the degenerate zero-key case of the grouped aggregation and backs the
/// plain-listing summary.
#[must_use]
pub fn summarize(records: &[waste_record::Model]) -> WasteSummary {
    let mut summary = WasteSummary {
        total_quantity: 0.0,
        total_cost: 0.0,
        count: 0,
    };

    for record in records {
        summary.total_quantity += record.quantity;
        summary.total_cost += record.cost;
        summary.count += 1;
    }

    summary
}

/// Folds `records` into per-food-type groups, each carrying one bucket per
/// discard reason seen within that food type. Both levels preserve
/// discovery order and sum quantity and cost.
#[must_use]
pub fn group_by_food_type(records: &[waste_record::Model]) -> Vec<FoodTypeBreakdown> {
    let mut groups: Vec<FoodTypeBreakdown> = Vec::new();

    for record in records {
        let group_idx = groups
            .iter()
            .position(|g| g.food_type == record.food_type)
            .unwrap_or_else(|| {
                groups.push(FoodTypeBreakdown {
                    food_type: record.food_type.clone(),
                    reasons: Vec::new(),
                    total_quantity: 0.0,
                    total_cost: 0.0,
                    total_entries: 0,
                });
                groups.len() - 1
            });
        let group = &mut groups[group_idx];

        let bucket_idx = group
            .reasons
            .iter()
            .position(|b| b.reason == record.reason)
            .unwrap_or_else(|| {
                group.reasons.push(ReasonBreakdown {
                    reason: record.reason.clone(),
                    quantity: 0.0,
                    cost: 0.0,
                    count: 0,
                });
                group.reasons.len() - 1
            });
        let bucket = &mut group.reasons[bucket_idx];

        bucket.quantity += record.quantity;
        bucket.cost += record.cost;
        bucket.count += 1;

        group.total_quantity += record.quantity;
        group.total_cost += record.cost;
        group.total_entries += 1;
    }

    groups
}

/// Produces the analytics report for `user_id` over the window that
/// `period` resolves to at `now`.
pub async fn aggregate_waste(
    db: &DatabaseConnection,
    user_id: &str,
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> Result<WasteAnalytics> {
    let start_date = period::resolve_start(period, now);

    let records = WasteRecord::find()
        .filter(waste_record::Column::UserId.eq(user_id))
        .filter(waste_record::Column::Date.gte(start_date))
        .all(db)
        .await?;

    Ok(WasteAnalytics {
        period,
        start_date,
        groups: group_by_food_type(&records),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::expect_used)]
    use super::*;
    use crate::core::waste::create_waste_record;
    use crate::test_utils::{setup_test_db, test_waste_record, waste_input_with};
    use chrono::TimeZone;

    #[test]
    fn test_summarize_empty_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_quantity, 0.0);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_summarize_sums_all_fields() {
        let records = vec![
            test_waste_record("Dairy", "Expired", 2.0, 100.0),
            test_waste_record("Meat", "Spoiled", 1.5, 50.0),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total_quantity, 3.5);
        assert_eq!(summary.total_cost, 150.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_group_same_food_type_two_reasons() {
        // Two Dairy records with different reasons collapse into one group
        // with two reason buckets and food-type-level totals.
        let records = vec![
            test_waste_record("Dairy", "Expired", 2.0, 100.0),
            test_waste_record("Dairy", "Spoiled", 1.0, 50.0),
        ];

        let groups = group_by_food_type(&records);
        assert_eq!(groups.len(), 1);

        let dairy = &groups[0];
        assert_eq!(dairy.food_type, "Dairy");
        assert_eq!(dairy.total_quantity, 3.0);
        assert_eq!(dairy.total_cost, 150.0);
        assert_eq!(dairy.total_entries, 2);
        assert_eq!(dairy.reasons.len(), 2);

        let expired = dairy
            .reasons
            .iter()
            .find(|b| b.reason == "Expired")
            .expect("Expired bucket");
        assert_eq!(expired.quantity, 2.0);
        assert_eq!(expired.cost, 100.0);
        assert_eq!(expired.count, 1);

        let spoiled = dairy
            .reasons
            .iter()
            .find(|b| b.reason == "Spoiled")
            .expect("Spoiled bucket");
        assert_eq!(spoiled.quantity, 1.0);
        assert_eq!(spoiled.cost, 50.0);
        assert_eq!(spoiled.count, 1);
    }

    #[test]
    fn test_group_repeated_reason_accumulates() {
        let records = vec![
            test_waste_record("Grains", "Expired", 1.0, 10.0),
            test_waste_record("Grains", "Expired", 2.0, 20.0),
            test_waste_record("Grains", "Expired", 3.0, 30.0),
        ];

        let groups = group_by_food_type(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].reasons.len(), 1);
        assert_eq!(groups[0].reasons[0].quantity, 6.0);
        assert_eq!(groups[0].reasons[0].cost, 60.0);
        assert_eq!(groups[0].reasons[0].count, 3);
        assert_eq!(groups[0].total_entries, 3);
    }

    #[test]
    fn test_group_preserves_discovery_order() {
        let records = vec![
            test_waste_record("Meat", "Spoiled", 1.0, 5.0),
            test_waste_record("Dairy", "Expired", 1.0, 5.0),
            test_waste_record("Meat", "Expired", 1.0, 5.0),
        ];

        let groups = group_by_food_type(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].food_type, "Meat");
        assert_eq!(groups[1].food_type, "Dairy");
        assert_eq!(groups[0].reasons[0].reason, "Spoiled");
        assert_eq!(groups[0].reasons[1].reason, "Expired");
    }

    #[tokio::test]
    async fn test_aggregate_empty_set_is_success() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let report = aggregate_waste(&db, "user-1", ReportPeriod::Month, now).await?;
        assert!(report.groups.is_empty());
        assert_eq!(report.period, ReportPeriod::Month);

        Ok(())
    }

    #[tokio::test]
    async fn test_aggregate_filters_by_window_and_user() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        // Inside the month window
        let inside = waste_input_with(
            "Dairy",
            "Expired",
            2.0,
            100.0,
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(),
        );
        create_waste_record(&db, "user-1", inside).await?;

        // Before the window
        let before = waste_input_with(
            "Dairy",
            "Spoiled",
            9.0,
            900.0,
            Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap(),
        );
        create_waste_record(&db, "user-1", before).await?;

        // Someone else's record inside the window
        let other = waste_input_with(
            "Meat",
            "Expired",
            1.0,
            10.0,
            Utc.with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap(),
        );
        create_waste_record(&db, "user-2", other).await?;

        let report = aggregate_waste(&db, "user-1", ReportPeriod::Month, now).await?;
        assert_eq!(
            report.start_date,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].food_type, "Dairy");
        assert_eq!(report.groups[0].total_cost, 100.0);
        assert_eq!(report.groups[0].reasons.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_aggregate_dairy_scenario() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let first = waste_input_with(
            "Dairy",
            "Expired",
            2.0,
            100.0,
            Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap(),
        );
        let second = waste_input_with(
            "Dairy",
            "Spoiled",
            1.0,
            50.0,
            Utc.with_ymd_and_hms(2024, 6, 6, 0, 0, 0).unwrap(),
        );
        create_waste_record(&db, "user-1", first).await?;
        create_waste_record(&db, "user-1", second).await?;

        let report = aggregate_waste(&db, "user-1", ReportPeriod::Month, now).await?;
        assert_eq!(report.groups.len(), 1);

        let dairy = &report.groups[0];
        assert_eq!(dairy.total_quantity, 3.0);
        assert_eq!(dairy.total_cost, 150.0);
        assert_eq!(dairy.total_entries, 2);
        assert_eq!(dairy.reasons.len(), 2);

        Ok(())
    }
}
