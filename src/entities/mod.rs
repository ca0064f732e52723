//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod donation;
pub mod expiry_item;
pub mod waste_record;

// Re-export specific types to avoid conflicts
pub use donation::{Column as DonationColumn, Entity as Donation, Model as DonationModel};
pub use expiry_item::{Column as ExpiryItemColumn, Entity as ExpiryItem, Model as ExpiryItemModel};
pub use waste_record::{
    Column as WasteRecordColumn, Entity as WasteRecord, Model as WasteRecordModel,
};
