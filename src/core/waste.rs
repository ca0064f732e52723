//! Waste record business logic - validation, ownership-checked CRUD, and
//! filtered listing.
//!
//! Every record belongs to exactly one user. Lookups distinguish a missing
//! record (`NotFound`) from a record owned by someone else (`Forbidden`);
//! existence is deliberately not hidden from non-owners. Records are
//! immutable except via full-record update and are deleted only by their
//! owner.

use crate::{
    core::analytics::{self, WasteSummary},
    entities::{WasteRecord, waste_record},
    errors::{Error, FieldError, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, QuerySelect, Select, Set, prelude::*};
use serde::Deserialize;

/// Closed set of food-type categories for waste records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodType {
    /// Fresh fruits and vegetables
    FruitsVegetables,
    /// Milk, cheese, yogurt
    Dairy,
    /// Meat and poultry
    Meat,
    /// Bread, rice, cereals
    Grains,
    /// Cooked or ready-to-eat food
    PreparedFood,
    /// Anything else
    Other,
}

impl FoodType {
    /// All food types, in display order.
    pub const ALL: [Self; 6] = [
        Self::FruitsVegetables,
        Self::Dairy,
        Self::Meat,
        Self::Grains,
        Self::PreparedFood,
        Self::Other,
    ];

    /// Canonical wire string for this food type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FruitsVegetables => "Fruits & Vegetables",
            Self::Dairy => "Dairy",
            Self::Meat => "Meat",
            Self::Grains => "Grains",
            Self::PreparedFood => "Prepared Food",
            Self::Other => "Other",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Closed set of measurement units for waste quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteUnit {
    /// Pounds
    Lbs,
    /// Kilograms
    Kg,
    /// Individual pieces
    Pieces,
    /// Servings
    Servings,
    /// Gallons
    Gallons,
    /// Liters
    Liters,
    /// Packages
    Packages,
    /// Cans
    Cans,
    /// Bottles
    Bottles,
}

impl WasteUnit {
    /// All units, in display order.
    pub const ALL: [Self; 9] = [
        Self::Lbs,
        Self::Kg,
        Self::Pieces,
        Self::Servings,
        Self::Gallons,
        Self::Liters,
        Self::Packages,
        Self::Cans,
        Self::Bottles,
    ];

    /// Canonical wire string for this unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lbs => "lbs",
            Self::Kg => "kg",
            Self::Pieces => "pieces",
            Self::Servings => "servings",
            Self::Gallons => "gallons",
            Self::Liters => "liters",
            Self::Packages => "packages",
            Self::Cans => "cans",
            Self::Bottles => "bottles",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }
}

/// Closed set of discard reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteReason {
    /// Past its expiry date
    Expired,
    /// Went bad before the expiry date
    Spoiled,
    /// More was prepared than eaten
    OverPrepared,
    /// Leftovers that were not consumed
    Leftovers,
    /// Anything else
    Other,
}

impl WasteReason {
    /// All reasons, in display order.
    pub const ALL: [Self; 5] = [
        Self::Expired,
        Self::Spoiled,
        Self::OverPrepared,
        Self::Leftovers,
        Self::Other,
    ];

    /// Canonical wire string for this reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::Spoiled => "Spoiled",
            Self::OverPrepared => "Over-prepared",
            Self::Leftovers => "Leftovers",
            Self::Other => "Other",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// Incoming waste record payload, used for both create and full-record
/// update. Enum fields arrive as raw strings and are checked against the
/// closed sets before anything is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWasteRecord {
    /// When the waste event happened
    pub date: DateTimeUtc,
    /// Food-type category string
    pub food_type: String,
    /// Wasted quantity
    pub quantity: f64,
    /// Measurement unit string
    pub unit: String,
    /// Discard reason string
    pub reason: String,
    /// Estimated cost
    pub cost: f64,
    /// Where the waste occurred
    pub location: String,
    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Optional filters applied to waste listings and their summary.
#[derive(Debug, Clone, Default)]
pub struct WasteFilter {
    /// Lower date bound; only applied together with `end_date`
    pub start_date: Option<NaiveDate>,
    /// Upper date bound; only applied together with `start_date`
    pub end_date: Option<NaiveDate>,
    /// Restrict to a single food type
    pub food_type: Option<FoodType>,
}

/// One page of waste records plus the aggregate over the whole filtered set.
#[derive(Debug, Clone)]
pub struct WastePage {
    /// Records on this page, date-descending
    pub records: Vec<waste_record::Model>,
    /// Total records matching the filter across all pages
    pub total: u64,
    /// Zero-key aggregate over every matching record, not just this page
    pub summary: WasteSummary,
}

/// Checks a payload against the closed enums and numeric invariants,
/// reporting every offending field at once.
fn validate(input: &NewWasteRecord) -> Result<(FoodType, WasteUnit, WasteReason)> {
    let mut errors = Vec::new();

    let food_type = FoodType::parse(&input.food_type);
    if food_type.is_none() {
        errors.push(FieldError::new("foodType", "Invalid food type"));
    }
    let unit = WasteUnit::parse(&input.unit);
    if unit.is_none() {
        errors.push(FieldError::new("unit", "Invalid unit"));
    }
    let reason = WasteReason::parse(&input.reason);
    if reason.is_none() {
        errors.push(FieldError::new("reason", "Invalid reason"));
    }
    if !input.quantity.is_finite() || input.quantity < 0.0 {
        errors.push(FieldError::new("quantity", "Quantity must be non-negative"));
    }
    if !input.cost.is_finite() || input.cost < 0.0 {
        errors.push(FieldError::new("cost", "Cost must be non-negative"));
    }
    if input.location.trim().is_empty() {
        errors.push(FieldError::new("location", "Location is required"));
    }

    match (food_type, unit, reason) {
        (Some(f), Some(u), Some(r)) if errors.is_empty() => Ok((f, u, r)),
        _ => Err(Error::validation(errors)),
    }
}

/// Fetches a record and verifies ownership, distinguishing `NotFound` from
/// `Forbidden`.
async fn find_owned(
    db: &DatabaseConnection,
    user_id: &str,
    id: i64,
) -> Result<waste_record::Model> {
    let record = WasteRecord::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Waste record",
            id: id.to_string(),
        })?;

    if record.user_id != user_id {
        return Err(Error::Forbidden {
            resource: "waste record",
            id: id.to_string(),
        });
    }

    Ok(record)
}

fn filtered_query(user_id: &str, filter: &WasteFilter) -> Select<WasteRecord> {
    let mut query = WasteRecord::find().filter(waste_record::Column::UserId.eq(user_id));

    // Date bounds only apply when both ends are given
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        query = query
            .filter(waste_record::Column::Date.gte(start.and_time(NaiveTime::MIN).and_utc()))
            .filter(waste_record::Column::Date.lte(end.and_time(NaiveTime::MIN).and_utc()));
    }

    if let Some(food_type) = filter.food_type {
        query = query.filter(waste_record::Column::FoodType.eq(food_type.as_str()));
    }

    query
}

/// Lists one page of a user's waste records, date-descending, together with
/// the zero-key aggregate over the whole filtered set.
pub async fn list_waste_records(
    db: &DatabaseConnection,
    user_id: &str,
    filter: &WasteFilter,
    page: u64,
    limit: u64,
) -> Result<WastePage> {
    let page = page.max(1);
    let limit = limit.max(1);

    let matching = filtered_query(user_id, filter).all(db).await?;
    let summary = analytics::summarize(&matching);
    let total = matching.len() as u64;

    let records = filtered_query(user_id, filter)
        .order_by_desc(waste_record::Column::Date)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(db)
        .await?;

    Ok(WastePage {
        records,
        total,
        summary,
    })
}

/// Fetches a single owned waste record.
pub async fn get_waste_record(
    db: &DatabaseConnection,
    user_id: &str,
    id: i64,
) -> Result<waste_record::Model> {
    find_owned(db, user_id, id).await
}

/// Validates and persists a new waste record for `user_id`.
pub async fn create_waste_record(
    db: &DatabaseConnection,
    user_id: &str,
    input: NewWasteRecord,
) -> Result<waste_record::Model> {
    let (food_type, unit, reason) = validate(&input)?;

    let now = chrono::Utc::now();
    let record = waste_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        date: Set(input.date),
        food_type: Set(food_type.as_str().to_string()),
        quantity: Set(input.quantity),
        unit: Set(unit.as_str().to_string()),
        reason: Set(reason.as_str().to_string()),
        cost: Set(input.cost),
        location: Set(input.location.trim().to_string()),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = record.insert(db).await?;
    Ok(result)
}

/// Replaces an owned waste record wholesale. Last write wins; there is no
/// field-level merge.
pub async fn update_waste_record(
    db: &DatabaseConnection,
    user_id: &str,
    id: i64,
    input: NewWasteRecord,
) -> Result<waste_record::Model> {
    let existing = find_owned(db, user_id, id).await?;
    let (food_type, unit, reason) = validate(&input)?;

    let mut active: waste_record::ActiveModel = existing.into();
    active.date = Set(input.date);
    active.food_type = Set(food_type.as_str().to_string());
    active.quantity = Set(input.quantity);
    active.unit = Set(unit.as_str().to_string());
    active.reason = Set(reason.as_str().to_string());
    active.cost = Set(input.cost);
    active.location = Set(input.location.trim().to_string());
    active.notes = Set(input.notes);
    active.updated_at = Set(chrono::Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes an owned waste record.
pub async fn delete_waste_record(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<()> {
    let record = find_owned(db, user_id, id).await?;
    record.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{setup_test_db, test_waste_input, waste_input_on};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_create_and_fetch_round_trip() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_waste_record(&db, "user-1", test_waste_input()).await?;
        let fetched = get_waste_record(&db, "user-1", created.id).await?;

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.food_type, "Dairy");
        assert_eq!(fetched.quantity, 2.0);
        assert_eq!(fetched.user_id, "user-1");

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_enum_fields_rejected_together() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = test_waste_input();
        input.food_type = "Sweets".to_string();
        input.quantity = -1.0;

        let err = create_waste_record(&db, "user-1", input).await.unwrap_err();
        match err {
            Error::Validation { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert!(fields.contains(&"foodType"));
                assert!(fields.contains(&"quantity"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Nothing was persisted
        let total = WasteRecord::find().all(&db).await?;
        assert!(total.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_non_owner_gets_forbidden_not_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_waste_record(&db, "owner", test_waste_input()).await?;
        let err = get_waste_record(&db, "intruder", created.id)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Forbidden { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let err = get_waste_record(&db, "user-1", 9999).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_waste_record(&db, "user-1", test_waste_input()).await?;

        let mut replacement = test_waste_input();
        replacement.food_type = "Meat".to_string();
        replacement.reason = "Spoiled".to_string();
        replacement.cost = 42.0;

        let updated = update_waste_record(&db, "user-1", created.id, replacement).await?;
        assert_eq!(updated.food_type, "Meat");
        assert_eq!(updated.reason, "Spoiled");
        assert_eq!(updated.cost, 42.0);
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_waste_record(&db, "owner", test_waste_input()).await?;
        let err = delete_waste_record(&db, "intruder", created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));

        // Still there for the owner
        get_waste_record(&db, "owner", created.id).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_list_paginates_date_descending() -> Result<()> {
        let db = setup_test_db().await?;

        for day in 1..=5 {
            let input = waste_input_on(Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap());
            create_waste_record(&db, "user-1", input).await?;
        }

        let page = list_waste_records(&db, "user-1", &WasteFilter::default(), 1, 2).await?;
        assert_eq!(page.total, 5);
        assert_eq!(page.records.len(), 2);
        assert!(page.records[0].date > page.records[1].date);
        assert_eq!(page.summary.count, 5);

        let last = list_waste_records(&db, "user-1", &WasteFilter::default(), 3, 2).await?;
        assert_eq!(last.records.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_date_filter_requires_both_bounds() -> Result<()> {
        let db = setup_test_db().await?;

        for day in 1..=10 {
            let input = waste_input_on(Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap());
            create_waste_record(&db, "user-1", input).await?;
        }

        // Only a start date: filter is ignored
        let filter = WasteFilter {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 8),
            ..Default::default()
        };
        let page = list_waste_records(&db, "user-1", &filter, 1, 20).await?;
        assert_eq!(page.total, 10);

        // Both bounds: inclusive window
        let filter = WasteFilter {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 5),
            ..Default::default()
        };
        let page = list_waste_records(&db, "user-1", &filter, 1, 20).await?;
        assert_eq!(page.total, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_food_type_filter_scopes_summary() -> Result<()> {
        let db = setup_test_db().await?;

        let mut dairy = test_waste_input();
        dairy.cost = 100.0;
        create_waste_record(&db, "user-1", dairy).await?;

        let mut meat = test_waste_input();
        meat.food_type = "Meat".to_string();
        meat.cost = 50.0;
        create_waste_record(&db, "user-1", meat).await?;

        let filter = WasteFilter {
            food_type: Some(FoodType::Dairy),
            ..Default::default()
        };
        let page = list_waste_records(&db, "user-1", &filter, 1, 10).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.summary.total_cost, 100.0);
        assert_eq!(page.summary.count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_scopes_to_user() -> Result<()> {
        let db = setup_test_db().await?;

        create_waste_record(&db, "user-1", test_waste_input()).await?;
        create_waste_record(&db, "user-2", test_waste_input()).await?;

        let page = list_waste_records(&db, "user-1", &WasteFilter::default(), 1, 10).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].user_id, "user-1");

        Ok(())
    }

    #[test]
    fn test_enum_parse_rejects_unknown() {
        assert_eq!(FoodType::parse("Dairy"), Some(FoodType::Dairy));
        assert_eq!(FoodType::parse("dairy"), None);
        assert_eq!(WasteUnit::parse("kg"), Some(WasteUnit::Kg));
        assert_eq!(WasteUnit::parse("stones"), None);
        assert_eq!(WasteReason::parse("Over-prepared"), Some(WasteReason::OverPrepared));
        assert_eq!(WasteReason::parse("Burnt"), None);
    }
}
