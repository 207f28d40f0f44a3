//! Notification Handlers

use axum::Json;
use serde::{Deserialize, Serialize};

const MSG_CLEARED: &str = "تم مسح الإشعارات بنجاح";

#[derive(Debug, Deserialize)]
pub struct ClearNotificationsRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ClearNotificationsResponse {
    pub message: &'static str,
}

/// POST /clear-notifications
///
/// Pure acknowledgment: notification entries live inside orders and are
/// append-only, so nothing is deleted or marked read here. The front-end
/// clears its own display. Kept as-is for wire compatibility.
pub async fn clear(
    Json(req): Json<ClearNotificationsRequest>,
) -> Json<ClearNotificationsResponse> {
    tracing::debug!(username = %req.username, "Notification clear acknowledged (no storage effect)");
    Json(ClearNotificationsResponse {
        message: MSG_CLEARED,
    })
}
