use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/summary", get(order_summary))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/dispatch-photo", post(submit_dispatch_photo))
        .route("/orders/:id/return-photo", post(submit_return_photo))
        .route("/orders/:id/comparison", post(run_comparison))
}

#[derive(Deserialize)]
pub struct DispatchPhotoRequest {
    pub photo: String,
}

#[derive(Deserialize)]
pub struct ReturnPhotoRequest {
    pub photo: String,
    pub reason: Option<String>,
}

/// Without an explicit score the configured scorer runs over the stored
/// photo pair (the simulated AI path).
#[derive(Deserialize)]
pub struct ComparisonRequest {
    pub score: Option<f64>,
}

#[derive(Serialize)]
pub struct OrderSummary {
    pub total: usize,
    pub pending: usize,
    pub dispatched: usize,
    pub delivered: usize,
    pub returned: usize,
    pub return_pending: usize,
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Json<Vec<Order>> {
    Json(state.store.list())
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    Ok(Json(order))
}

async fn order_summary(State(state): State<Arc<AppState>>) -> Json<OrderSummary> {
    let orders = state.store.list();
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    Json(OrderSummary {
        total: orders.len(),
        pending: count(OrderStatus::Pending),
        dispatched: count(OrderStatus::Dispatched),
        delivered: count(OrderStatus::Delivered),
        returned: count(OrderStatus::Returned),
        return_pending: count(OrderStatus::ReturnPending),
    })
}

async fn submit_dispatch_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<DispatchPhotoRequest>,
) -> Result<Json<Order>, AppError> {
    if payload.photo.trim().is_empty() {
        return Err(AppError::BadRequest("photo cannot be empty".to_string()));
    }

    let order = state.lifecycle.submit_dispatch_photo(&id, payload.photo)?;
    Ok(Json(order))
}

async fn submit_return_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ReturnPhotoRequest>,
) -> Result<Json<Order>, AppError> {
    if payload.photo.trim().is_empty() {
        return Err(AppError::BadRequest("photo cannot be empty".to_string()));
    }

    let order = state
        .lifecycle
        .submit_return_photo(&id, payload.photo, payload.reason)?;
    Ok(Json(order))
}

async fn run_comparison(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ComparisonRequest>,
) -> Result<Json<Order>, AppError> {
    let order = match payload.score {
        Some(score) => {
            if !(0.0..=100.0).contains(&score) {
                return Err(AppError::BadRequest(format!(
                    "score {score} outside [0, 100]"
                )));
            }
            state.lifecycle.resolve_return_comparison(&id, score)?
        }
        None => state.lifecycle.analyze_return(&id).await?,
    };

    Ok(Json(order))
}
