//! Application settings loaded from the environment.
//!
//! Every value has a development default so the server starts from a bare
//! checkout; production deployments set the variables explicitly.

use crate::errors::{Error, Result};

/// Default SQLite database path.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/usana.sqlite?mode=rwc";
/// Default HTTP port.
const DEFAULT_PORT: u16 = 5000;
/// Default allowed browser origin for CORS.
const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";
/// Default reference-data file.
const DEFAULT_REFERENCE_DATA_PATH: &str = "reference_data.toml";

/// Runtime configuration for the server process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP listener binds to
    pub port: u16,
    /// `SeaORM` database URL
    pub database_url: String,
    /// Browser origin allowed by the CORS layer
    pub client_origin: String,
    /// Path to the read-only reference-data TOML file
    pub reference_data_path: String,
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to
    /// development defaults for anything unset.
    pub fn load() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| Error::Config {
                message: format!("PORT must be a number, got {raw:?}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            client_origin: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ORIGIN.to_string()),
            reference_data_path: std::env::var("REFERENCE_DATA_PATH")
                .unwrap_or_else(|_| DEFAULT_REFERENCE_DATA_PATH.to_string()),
        })
    }
}
