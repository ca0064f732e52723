use dotenvy::dotenv;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use usana_server::{
    api::{self, AppState},
    config::{database, reference, settings::AppConfig},
    errors::{Error, Result},
};

use axum::http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the application configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded.");

    // 4. Initialize database
    let db = database::create_connection(&config.database_url)
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Load the injected read-only reference datasets
    let reference_data = reference::load_reference_data(&config.reference_data_path)
        .inspect(|data| {
            info!(
                diseases = data.diseases.len(),
                deliveries = data.deliveries.len(),
                "Reference data loaded."
            );
        })
        .inspect_err(|e| error!("Failed to load reference data: {e}"))?;

    // 6. Build the router and serve
    let origin = config
        .client_origin
        .parse::<HeaderValue>()
        .map_err(|_| Error::Config {
            message: format!("CLIENT_URL is not a valid origin: {}", config.client_origin),
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(api::auth::USER_ID_HEADER),
        ])
        .max_age(Duration::from_secs(60 * 60));

    let state = AppState::new(db, reference_data);
    let app = api::router(state).layer(cors);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => error!("Failed to install signal handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
