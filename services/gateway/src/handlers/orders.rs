use axum::{extract::State, Json};

use order_book::{intake, matcher, query, SubmitResult};
use types::numeric::{Price, Quantity};
use types::order::{PendingOrder, Side};
use types::trade::Trade;

use crate::error::AppError;
use crate::models::{BuyerOrderRequest, MatchOrdersRequest, MessageResponse, SellerOrderRequest};
use crate::state::AppState;

pub async fn root() -> &'static str {
    "Hi"
}

pub async fn create_seller_order(
    State(state): State<AppState>,
    Json(payload): Json<SellerOrderRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let price = Price::try_new(payload.seller_price)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let quantity =
        Quantity::try_new(payload.seller_qty).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let message = match intake::submit(&state.store, Side::SELL, price, quantity).await? {
        SubmitResult::Created(_) => "Seller Order created successfully",
        SubmitResult::Merged(_) => "Seller Order merged into existing price level",
    };

    Ok(Json(MessageResponse::new(message)))
}

pub async fn create_buyer_order(
    State(state): State<AppState>,
    Json(payload): Json<BuyerOrderRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let price =
        Price::try_new(payload.buyer_price).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let quantity =
        Quantity::try_new(payload.buyer_qty).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let message = match intake::submit(&state.store, Side::BUY, price, quantity).await? {
        SubmitResult::Created(_) => "Buyer Order created successfully",
        SubmitResult::Merged(_) => "Buyer Order merged into existing price level",
    };

    Ok(Json(MessageResponse::new(message)))
}

pub async fn seller_pending_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingOrder>>, AppError> {
    Ok(Json(query::pending_sell_orders(&state.store).await?))
}

pub async fn buyer_pending_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<PendingOrder>>, AppError> {
    Ok(Json(query::pending_buy_orders(&state.store).await?))
}

pub async fn completed_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<Trade>>, AppError> {
    Ok(Json(query::completed_trades(&state.store).await?))
}

pub async fn match_orders(
    State(state): State<AppState>,
    Json(payload): Json<MatchOrdersRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let price =
        Price::try_new(payload.buyer_price).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let quantity =
        Quantity::try_new(payload.buyer_qty).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let report = matcher::match_orders(&state.store, price, quantity).await?;

    Ok(Json(MessageResponse::new(report.confirmation())))
}
