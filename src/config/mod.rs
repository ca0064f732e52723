/// Database connection and schema setup
pub mod database;

/// Read-only reference data loaded from TOML
pub mod reference;

/// Application settings from environment variables
pub mod settings;
