//! Waste record entity - One logged food-waste event.
//!
//! Each record is exclusively owned by one user (`user_id`) and carries the
//! event date, a food-type category, the wasted quantity with its unit, a
//! discard reason, and the estimated cost. Records never transition state;
//! they are replaced wholesale on update and removed only by their owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Waste record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "waste_records")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the owning user, as supplied by the identity provider
    pub user_id: String,
    /// When the waste event happened
    pub date: DateTimeUtc,
    /// Food-type category, canonical string form of [`crate::core::waste::FoodType`]
    pub food_type: String,
    /// Wasted quantity, non-negative
    pub quantity: f64,
    /// Measurement unit, canonical string form of [`crate::core::waste::WasteUnit`]
    pub unit: String,
    /// Discard reason, canonical string form of [`crate::core::waste::WasteReason`]
    pub reason: String,
    /// Estimated cost of the wasted food, non-negative
    pub cost: f64,
    /// Free-text location where the waste occurred
    pub location: String,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// When the record was last replaced
    pub updated_at: DateTimeUtc,
}

/// Waste records reference their owner only by opaque id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
