use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::orders;
use crate::state::AppState;

pub fn create_router(state: AppState, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        Err(_) => {
            tracing::warn!(cors_origin, "invalid CORS origin, falling back to permissive");
            CorsLayer::permissive()
        }
    };

    Router::new()
        .route("/", get(orders::root))
        .route("/seller-orders", post(orders::create_seller_order))
        .route("/buyer-orders", post(orders::create_buyer_order))
        .route("/seller-pending-orders", get(orders::seller_pending_orders))
        .route("/buyer-pending-orders", get(orders::buyer_pending_orders))
        .route("/completed-orders", get(orders::completed_orders))
        .route("/match-orders", post(orders::match_orders))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
