// SPDX-License-Identifier: MPL-2.0
//! Static files compiled in from `assets/public/`.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/public/"]
struct PublicAsset;

/// Serves the embedded file at `path` (relative, without leading slash).
pub fn response_for(path: &str) -> Option<Response> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    let file = PublicAsset::get(path)?;
    let mime = file.metadata.mimetype().to_string();
    Some(([(header::CONTENT_TYPE, mime)], file.data.into_owned()).into_response())
}
