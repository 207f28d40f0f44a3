//! Notification Routes

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/clear-notifications", post(handler::clear))
}
