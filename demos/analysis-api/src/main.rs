mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

#[tokio::main]
async fn main() {
    eprintln!("Initializing deckcore engine...");
    let engine = deckcore::Deckcore::builder().build();
    eprintln!("Engine ready: {engine}");

    let state = Arc::new(AppState { engine });

    let app = Router::new()
        .route("/v1/limitless/count", get(routes::limitless::count))
        .route("/v1/deck/core", get(routes::deck::core))
        .route("/v1/deck/above50", get(routes::deck::above50))
        .route("/v1/deck/base", get(routes::deck::base))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    eprintln!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
