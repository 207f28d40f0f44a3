//! Medicine Image Routes
//!
//! Serves the uploaded-image blob directory under the same `/Images/...`
//! paths that medicine records reference.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;

/// Image file response
enum ImageResponse {
    Ok(Bytes, String),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ImageResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ImageResponse::Ok(content, content_type) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            ImageResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ImageResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve a stored medicine image
async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ImageResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ImageResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.images_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .to_string();
            ImageResponse::Ok(content.into(), content_type)
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Image not found");
            ImageResponse::NotFound
        }
    }
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/Images/{filename}", get(serve_image))
}
