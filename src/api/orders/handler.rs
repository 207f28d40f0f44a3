//! Order Workflow Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{DeliveryUpdate, Order, OrderCreate};
use crate::db::repository::{OrderRepository, RepoError};
use crate::utils::{AppError, AppResult};

const MSG_PLACED: &str = "تم ارسال الطلب بنجاح";
const MSG_INSUFFICIENT: &str = "الكمية المتوفرة من أحد الأدوية غير كافية";
const MSG_ORDER_NOT_FOUND: &str = "الطلب غير موجود";
const MSG_DELIVERY_UPDATED: &str = "تم تحديث وقت التسليم بنجاح";
const MSG_CONFIRMED: &str = "تم تأكيد الطلب";
const MSG_REJECTED: &str = "تم رفض الطلب";
const MSG_ORDERS_CLEARED: &str = "تم مسح جميع الطلبات بنجاح";

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    #[serde(rename = "orderId")]
    pub order_id: u64,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub message: &'static str,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct ClearOrdersResponse {
    pub message: &'static str,
}

/// POST /orders - place an order against catalog stock
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<PlaceOrderResponse>)> {
    let repo = OrderRepository::new(state.store.clone());
    let order = repo.place(payload).map_err(|e| match e {
        RepoError::InsufficientStock(_) => AppError::business_rule(MSG_INSUFFICIENT),
        other => AppError::internal(other.to_string()),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            message: MSG_PLACED,
            order_id: order.id,
        }),
    ))
}

/// GET /orders - full snapshot for the admin dashboard
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    let repo = OrderRepository::new(state.store.clone());
    Json(repo.find_all())
}

/// PUT /orders/{id}/delivery-time - admin sets time/status/price
pub async fn update_delivery(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(patch): Json<DeliveryUpdate>,
) -> AppResult<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.store.clone());
    let order = repo.update_delivery(id, patch).map_err(|e| match e {
        RepoError::NotFound(_) => AppError::not_found(MSG_ORDER_NOT_FOUND),
        other => AppError::internal(other.to_string()),
    })?;

    Ok(Json(OrderResponse {
        message: MSG_DELIVERY_UPDATED,
        order,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmDeliveryRequest {
    pub confirmed: bool,
}

/// PUT /orders/{id}/confirm-delivery - customer accepts or rejects the
/// quoted price
pub async fn confirm_delivery(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(req): Json<ConfirmDeliveryRequest>,
) -> AppResult<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.store.clone());
    let order = repo
        .confirm_delivery(id, req.confirmed)
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::not_found(MSG_ORDER_NOT_FOUND),
            other => AppError::internal(other.to_string()),
        })?;

    Ok(Json(OrderResponse {
        message: if req.confirmed {
            MSG_CONFIRMED
        } else {
            MSG_REJECTED
        },
        order,
    }))
}

/// POST /clear-orders - empties the whole collection
pub async fn clear_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<ClearOrdersResponse>> {
    let repo = OrderRepository::new(state.store.clone());
    repo.clear_all()
        .map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!("Cleared all orders");

    Ok(Json(ClearOrdersResponse {
        message: MSG_ORDERS_CLEARED,
    }))
}
