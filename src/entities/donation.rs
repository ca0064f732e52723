//! Donation entity - One registered food or money donation.
//!
//! Storage flattens the two donation shapes into nullable columns plus the
//! `donation_type` discriminant. The domain layer only ever sees the tagged
//! union [`crate::core::donation::DonationDetails`], so a food donation can
//! never carry money fields or vice versa; the conversion lives in
//! `core::donation`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the donation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the donating user
    pub donor_id: String,
    /// Discriminant: `"food"` or `"money"`
    pub donation_type: String,
    /// Food donations: food-type category
    pub food_type: Option<String>,
    /// Food donations: free-text magnitude
    pub quantity: Option<String>,
    /// Food donations: measurement unit
    pub unit: Option<String>,
    /// Food donations: expiry date of the donated food
    pub expiry_date: Option<Date>,
    /// Food donations: where the food can be collected
    pub pickup_location: Option<String>,
    /// Food donations: free-text description
    pub description: Option<String>,
    /// Money donations: donated amount
    pub amount: Option<f64>,
    /// Money donations: ISO-ish currency code, defaults to KES
    pub currency: Option<String>,
    /// Money donations: payment channel
    pub payment_method: Option<String>,
    /// Money donations: external transaction reference
    pub transaction_id: Option<String>,
    /// Lifecycle status, canonical string form of [`crate::core::donation::DonationStatus`]
    pub status: String,
    /// Identity of the receiving user, once assigned
    pub recipient_id: Option<String>,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// When the donation was registered
    pub created_at: DateTimeUtc,
    /// When the donation was last updated
    pub updated_at: DateTimeUtc,
}

/// Donations reference donor and recipient only by opaque id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
