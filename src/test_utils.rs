//! Shared test utilities for the Usana backend.
//!
//! Provides the standard in-memory database setup and factory helpers with
//! sensible defaults for the three record kinds.

use crate::{
    core::donation::{DonationDetails, FoodDonation, MoneyDonation, NewDonation},
    core::expiry::NewExpiryItem,
    core::waste::NewWasteRecord,
    entities::waste_record,
    errors::Result,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A valid waste record payload: 2.0 lbs of Dairy, Expired, cost 100.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_waste_input() -> NewWasteRecord {
    waste_input_on(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap())
}

/// A valid waste record payload dated `date`.
#[must_use]
pub fn waste_input_on(date: DateTime<Utc>) -> NewWasteRecord {
    waste_input_with("Dairy", "Expired", 2.0, 100.0, date)
}

/// A waste record payload with custom classification fields.
#[must_use]
pub fn waste_input_with(
    food_type: &str,
    reason: &str,
    quantity: f64,
    cost: f64,
    date: DateTime<Utc>,
) -> NewWasteRecord {
    NewWasteRecord {
        date,
        food_type: food_type.to_string(),
        quantity,
        unit: "lbs".to_string(),
        reason: reason.to_string(),
        cost,
        location: "Home kitchen".to_string(),
        notes: None,
    }
}

/// An in-memory waste record model for pure aggregation tests; only the
/// grouping and summed fields carry meaning.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_waste_record(
    food_type: &str,
    reason: &str,
    quantity: f64,
    cost: f64,
) -> waste_record::Model {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    waste_record::Model {
        id: 0,
        user_id: "test-user".to_string(),
        date: now,
        food_type: food_type.to_string(),
        quantity,
        unit: "lbs".to_string(),
        reason: reason.to_string(),
        cost,
        location: "Home kitchen".to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

/// A valid expiry item payload expiring well in the future.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_expiry_input() -> NewExpiryItem {
    expiry_input_expiring(
        Utc::now()
            .date_naive()
            .checked_add_days(chrono::Days::new(14))
            .unwrap(),
    )
}

/// A valid expiry item payload with the given expiry date.
#[must_use]
pub fn expiry_input_expiring(expiry_date: NaiveDate) -> NewExpiryItem {
    NewExpiryItem {
        item_name: "Whole milk".to_string(),
        category: "Dairy".to_string(),
        purchase_date: expiry_date
            .checked_sub_days(chrono::Days::new(7))
            .unwrap_or(expiry_date),
        expiry_date,
        quantity: "2 liters".to_string(),
        location: "Refrigerator".to_string(),
        notes: None,
    }
}

/// A valid pending food donation payload.
#[must_use]
pub fn test_food_donation() -> NewDonation {
    NewDonation {
        details: DonationDetails::Food(FoodDonation {
            food_type: "fresh-produce".to_string(),
            quantity: Some("10".to_string()),
            unit: Some("kg".to_string()),
            expiry_date: None,
            pickup_location: Some("Kasarani depot".to_string()),
            description: None,
        }),
        status: None,
        recipient_id: None,
        notes: None,
    }
}

/// A valid pending money donation payload.
#[must_use]
pub fn test_money_donation() -> NewDonation {
    NewDonation {
        details: DonationDetails::Money(MoneyDonation {
            amount: 2500.0,
            currency: None,
            payment_method: Some("paystack".to_string()),
            transaction_id: None,
        }),
        status: None,
        recipient_id: None,
        notes: None,
    }
}
