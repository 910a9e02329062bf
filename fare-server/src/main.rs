use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use fare_server::fares::FareTable;
use fare_server::stations::london_stations;
use fare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Reference data is fixed at startup
    let directory = london_stations();
    let fares = FareTable::default();
    println!("Loaded {} stations", directory.len());

    let state = AppState::new(directory, fares);
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Fare card server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health                - Health check");
    println!("  GET  /stations              - Station directory");
    println!("  POST /cards                 - Issue a card");
    println!("  GET  /cards/:id             - Card balance and journey state");
    println!("  POST /cards/:id/load        - Load value");
    println!("  POST /cards/:id/tap-in      - Tap in (tube or bus)");
    println!("  POST /cards/:id/tap-out     - Tap out, settling the fare");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
