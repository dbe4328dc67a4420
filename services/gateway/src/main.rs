mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use config::Settings;
use order_book::OrderBookStore;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting order book gateway");

    let settings = Settings::load()?;

    // Open storage, creating the database and tables if they don't exist
    let store =
        OrderBookStore::connect(&settings.database.url, settings.database.max_connections).await?;

    let state = AppState::new(store);
    let app = create_router(state, &settings.server.cors_origin);

    let listener = TcpListener::bind(&settings.server.bind_addr).await?;
    tracing::info!("Listening on {}", settings.server.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
