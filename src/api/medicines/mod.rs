//! Medicine Catalog Routes

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/medicines", get(handler::list).post(handler::create))
        .route(
            "/medicines/{id}",
            put(handler::update).delete(handler::remove),
        )
}
