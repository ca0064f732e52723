//! Expiry item business logic - validation, ownership-checked CRUD, and the
//! live-status listing.
//!
//! The stored `status` column is only a write-time snapshot. Every listing
//! overwrites it with a freshly computed classification before the items
//! leave this module; nothing downstream may treat the persisted value as
//! current.

use crate::{
    core::freshness,
    entities::{ExpiryItem, expiry_item},
    errors::{Error, FieldError, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Closed set of expiry item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Fresh fruits
    Fruits,
    /// Fresh vegetables
    Vegetables,
    /// Milk, cheese, yogurt
    Dairy,
    /// Meat and poultry
    Meat,
    /// Bread and pastries
    Bakery,
    /// Shelf-stable goods
    PantryItems,
    /// Frozen food
    Frozen,
    /// Drinks
    Beverages,
}

impl ItemCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 8] = [
        Self::Fruits,
        Self::Vegetables,
        Self::Dairy,
        Self::Meat,
        Self::Bakery,
        Self::PantryItems,
        Self::Frozen,
        Self::Beverages,
    ];

    /// Canonical wire string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fruits => "Fruits",
            Self::Vegetables => "Vegetables",
            Self::Dairy => "Dairy",
            Self::Meat => "Meat",
            Self::Bakery => "Bakery",
            Self::PantryItems => "Pantry Items",
            Self::Frozen => "Frozen",
            Self::Beverages => "Beverages",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Closed set of storage locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageLocation {
    /// Refrigerated storage
    Refrigerator,
    /// Frozen storage
    Freezer,
    /// Pantry shelf
    Pantry,
    /// Kitchen counter
    Counter,
    /// Cupboard
    Cupboard,
}

impl StorageLocation {
    /// All locations, in display order.
    pub const ALL: [Self; 5] = [
        Self::Refrigerator,
        Self::Freezer,
        Self::Pantry,
        Self::Counter,
        Self::Cupboard,
    ];

    /// Canonical wire string for this location.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Refrigerator => "Refrigerator",
            Self::Freezer => "Freezer",
            Self::Pantry => "Pantry",
            Self::Counter => "Counter",
            Self::Cupboard => "Cupboard",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// Incoming expiry item payload, used for both create and full-record
/// update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpiryItem {
    /// Item name
    pub item_name: String,
    /// Category string
    pub category: String,
    /// Calendar date the item was purchased
    pub purchase_date: NaiveDate,
    /// Calendar date the item expires
    pub expiry_date: NaiveDate,
    /// Free-text magnitude plus unit
    pub quantity: String,
    /// Storage location string
    pub location: String,
    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

fn validate(input: &NewExpiryItem) -> Result<(ItemCategory, StorageLocation)> {
    let mut errors = Vec::new();

    if input.item_name.trim().is_empty() {
        errors.push(FieldError::new("itemName", "Item name is required"));
    }
    let category = ItemCategory::parse(&input.category);
    if category.is_none() {
        errors.push(FieldError::new("category", "Invalid category"));
    }
    if input.quantity.trim().is_empty() {
        errors.push(FieldError::new("quantity", "Quantity is required"));
    }
    let location = StorageLocation::parse(&input.location);
    if location.is_none() {
        errors.push(FieldError::new("location", "Invalid location"));
    }

    match (category, location) {
        (Some(c), Some(l)) if errors.is_empty() => Ok((c, l)),
        _ => Err(Error::validation(errors)),
    }
}

async fn find_owned(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<expiry_item::Model> {
    let item = ExpiryItem::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Expiry item",
            id: id.to_string(),
        })?;

    if item.user_id != user_id {
        return Err(Error::Forbidden {
            resource: "expiry item",
            id: id.to_string(),
        });
    }

    Ok(item)
}

/// The live freshness classification of `item` at `reference`, independent
/// of whatever snapshot is stored.
#[must_use]
pub fn live_status(item: &expiry_item::Model, reference: NaiveDate) -> freshness::FreshnessStatus {
    freshness::classify(item.expiry_date, reference)
}

/// Overwrites each item's stored status snapshot with the classification
/// computed at `reference`. Pure: same input and reference date always
/// yield the same output, and storage is untouched.
#[must_use]
pub fn with_live_status(
    items: Vec<expiry_item::Model>,
    reference: NaiveDate,
) -> Vec<expiry_item::Model> {
    items
        .into_iter()
        .map(|mut item| {
            item.status = live_status(&item, reference).as_str().to_string();
            item
        })
        .collect()
}

/// Lists all of a user's expiry items sorted by expiry date ascending, with
/// every status recomputed against `reference`.
pub async fn list_expiry_items(
    db: &DatabaseConnection,
    user_id: &str,
    reference: NaiveDate,
) -> Result<Vec<expiry_item::Model>> {
    let items = ExpiryItem::find()
        .filter(expiry_item::Column::UserId.eq(user_id))
        .order_by_asc(expiry_item::Column::ExpiryDate)
        .all(db)
        .await?;

    Ok(with_live_status(items, reference))
}

/// Validates and persists a new expiry item, deriving the initial status
/// snapshot from the expiry date and the current date.
pub async fn create_expiry_item(
    db: &DatabaseConnection,
    user_id: &str,
    input: NewExpiryItem,
) -> Result<expiry_item::Model> {
    let (category, location) = validate(&input)?;

    let now = chrono::Utc::now();
    let status = freshness::classify(input.expiry_date, now.date_naive());

    let item = expiry_item::ActiveModel {
        user_id: Set(user_id.to_string()),
        item_name: Set(input.item_name.trim().to_string()),
        category: Set(category.as_str().to_string()),
        purchase_date: Set(input.purchase_date),
        expiry_date: Set(input.expiry_date),
        quantity: Set(input.quantity.trim().to_string()),
        location: Set(location.as_str().to_string()),
        status: Set(status.as_str().to_string()),
        notification_sent: Set(false),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    Ok(result)
}

/// Replaces an owned expiry item wholesale, refreshing the status snapshot
/// from the new expiry date. The notification flag survives the update.
pub async fn update_expiry_item(
    db: &DatabaseConnection,
    user_id: &str,
    id: i64,
    input: NewExpiryItem,
) -> Result<expiry_item::Model> {
    let existing = find_owned(db, user_id, id).await?;
    let (category, location) = validate(&input)?;

    let now = chrono::Utc::now();
    let status = freshness::classify(input.expiry_date, now.date_naive());

    let mut active: expiry_item::ActiveModel = existing.into();
    active.item_name = Set(input.item_name.trim().to_string());
    active.category = Set(category.as_str().to_string());
    active.purchase_date = Set(input.purchase_date);
    active.expiry_date = Set(input.expiry_date);
    active.quantity = Set(input.quantity.trim().to_string());
    active.location = Set(location.as_str().to_string());
    active.status = Set(status.as_str().to_string());
    active.notes = Set(input.notes);
    active.updated_at = Set(now);

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes an owned expiry item.
pub async fn delete_expiry_item(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<()> {
    let item = find_owned(db, user_id, id).await?;
    item.delete(db).await?;
    Ok(())
}
