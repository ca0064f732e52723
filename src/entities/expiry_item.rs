//! Expiry item entity - A perishable item tracked against its expiry date.
//!
//! The `status` column is a best-effort snapshot of the freshness
//! classification taken at write time. It is never authoritative: every read
//! path recomputes the status from `expiry_date` and the current date via
//! [`crate::core::freshness::classify`] before surfacing the item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expiry item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expiry_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the owning user, as supplied by the identity provider
    pub user_id: String,
    /// Human-readable item name (e.g., "Whole milk")
    pub item_name: String,
    /// Category, canonical string form of [`crate::core::expiry::ItemCategory`]
    pub category: String,
    /// Calendar date the item was purchased
    pub purchase_date: Date,
    /// Calendar date the item expires
    pub expiry_date: Date,
    /// Free-text magnitude plus unit (e.g., "2 liters")
    pub quantity: String,
    /// Storage location, canonical string form of [`crate::core::expiry::StorageLocation`]
    pub location: String,
    /// Stored snapshot of the freshness status; recomputed on every read
    pub status: String,
    /// Whether an expiry notification has been sent for this item
    pub notification_sent: bool,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// When the item was created
    pub created_at: DateTimeUtc,
    /// When the item was last replaced
    pub updated_at: DateTimeUtc,
}

/// Expiry items reference their owner only by opaque id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
