//! Order Workflow Routes
//!
//! Placement, listing, the delivery negotiation endpoints and the bulk
//! clear.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list).post(handler::place))
        .route(
            "/orders/{id}/delivery-time",
            put(handler::update_delivery),
        )
        .route(
            "/orders/{id}/confirm-delivery",
            put(handler::confirm_delivery),
        )
        .route("/clear-orders", post(handler::clear_orders))
}
