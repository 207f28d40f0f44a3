//! Identity Routes
//!
//! Registration, login and the admin-retaining bulk clear.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/clear-users", post(handler::clear_users))
}
