//! Front-end Page Fallback
//!
//! Everything the API routers do not match falls through here:
//!
//! 1. an existing file under the work dir is served as-is;
//! 2. known page names match case-insensitively, with or without a
//!    `pages/` prefix;
//! 3. anything else gets `index.html` for client-side routing.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Path, PathBuf};

use crate::core::ServerState;

/// Pages the front-end links to; matched case-insensitively
const PAGES: &[&str] = &[
    "index.html",
    "medicine.html",
    "login.html",
    "resigter.html",
    "admin.html",
    "about.html",
    "services.html",
    "notification.html",
];

async fn serve_file(path: &Path) -> Option<Response> {
    let content = tokio::fs::read(path).await.ok()?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    Some((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], content).into_response())
}

/// Catch-all fallback for the static front-end
pub async fn fallback(State(state): State<ServerState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }

    let requested = uri.path().trim_start_matches('/');
    if requested.contains("..") {
        return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
    }

    // Requests under /pages/ resolve against the work dir root
    let requested = requested
        .strip_prefix("pages/")
        .or_else(|| requested.strip_prefix("Pages/"))
        .unwrap_or(requested);

    let dir: PathBuf = state.config.pages_dir();

    if !requested.is_empty() {
        let candidate = dir.join(requested);
        if candidate.is_file()
            && let Some(response) = serve_file(&candidate).await
        {
            return response;
        }

        // Case-insensitive match for the known pages
        if let Some(page) = PAGES.iter().find(|p| p.eq_ignore_ascii_case(requested))
            && let Some(response) = serve_file(&dir.join(page)).await
        {
            return response;
        }
    }

    // Client-side routing fallback
    match serve_file(&dir.join("index.html")).await {
        Some(response) => response,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
