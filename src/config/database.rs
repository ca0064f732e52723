//! Database connection and table creation using `SeaORM`.
//!
//! Schema is generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust structs without hand-written SQL. Table creation is idempotent to
//! keep startup safe against an existing database file.

use crate::entities::{Donation, ExpiryItem, WasteRecord};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database named by `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut waste_table = schema.create_table_from_entity(WasteRecord);
    let mut expiry_table = schema.create_table_from_entity(ExpiryItem);
    let mut donation_table = schema.create_table_from_entity(Donation);

    db.execute(builder.build(waste_table.if_not_exists()))
        .await?;
    db.execute(builder.build(expiry_table.if_not_exists()))
        .await?;
    db.execute(builder.build(donation_table.if_not_exists()))
        .await?;

    Ok(())
}
