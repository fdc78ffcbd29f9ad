// SPDX-License-Identifier: MPL-2.0
//! Request handlers. Each resolves the request language, then hands a bound
//! translator (and localized data) to the renderer.

use super::assets;
use super::state::AppState;
use crate::i18n::language::{cookie_value, COOKIE_NAME};
use crate::i18n::LanguageSelector;
use axum::extract::{Query, State};
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, COOKIE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Default, Deserialize)]
struct LanguageQuery {
    lng: Option<String>,
}

/// Collects the language hints carried by a request.
pub fn selector_from_request(uri: &Uri, headers: &HeaderMap) -> LanguageSelector {
    // A malformed query string is just a missing hint.
    let query = Query::<LanguageQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.lng);

    let cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| cookie_value(value, COOKIE_NAME))
        .map(str::to_string);

    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    LanguageSelector {
        query,
        cookie,
        accept_language,
    }
}

fn html_response(status: StatusCode, language: &LanguageIdentifier, body: String) -> Response {
    (
        status,
        [(CONTENT_LANGUAGE, language.to_string())],
        Html(body),
    )
        .into_response()
}

pub async fn home(State(state): State<Arc<AppState>>, uri: Uri, headers: HeaderMap) -> Response {
    let language = state.resolve_language(&selector_from_request(&uri, &headers));
    let page = state.page(language.clone());
    html_response(StatusCode::OK, &language, state.renderer.home(&page))
}

pub async fn projects(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let language = state.resolve_language(&selector_from_request(&uri, &headers));
    let page = state.page(language.clone());

    match state.projects.localize(&language) {
        Ok(projects) => html_response(
            StatusCode::OK,
            &language,
            state.renderer.projects(&page, &projects),
        ),
        Err(err) => {
            tracing::error!(error = %err, language = %language, "failed to localize projects");
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &language,
                state.renderer.error(&page),
            )
        }
    }
}

/// Static files first, then a localized 404 page.
pub async fn fallback(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Some(asset) = assets::response_for(uri.path()) {
        return asset;
    }

    tracing::debug!(path = uri.path(), "no route or asset");
    let language = state.resolve_language(&selector_from_request(&uri, &headers));
    let page = state.page(language.clone());
    html_response(StatusCode::NOT_FOUND, &language, state.renderer.not_found(&page))
}
