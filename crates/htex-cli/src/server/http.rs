// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server for serving a content tree.
//!
//! A thin adapter that converts HTTP requests to [`HtexRequest`], calls
//! [`Htex::handle`], and converts [`HtexResponse`] back to HTTP. All
//! routing decisions live in the engine.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use htex::{Htex, HtexRequest, HtexResponse};

const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state for the server.
pub struct AppState {
    /// The template engine.
    pub engine: Htex,
}

/// Creates and starts the HTTP server.
pub async fn create_server(addr: &str, engine: Htex) -> anyhow::Result<()> {
    let state = Arc::new(AppState { engine });

    let app = Router::new().fallback(fallback_handler).with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handles every request: convert, dispatch to the engine, convert back.
async fn fallback_handler(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let path = uri.path().to_string();
    let query_string = uri.query().unwrap_or_default().to_string();

    let body_bytes = if method != Method::GET && method != Method::HEAD {
        match axum::body::to_bytes(body, MAX_BODY_SIZE).await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(_) => {
                return (StatusCode::BAD_REQUEST, "Body too large").into_response();
            }
        }
    } else {
        None
    };

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let htex_request = to_htex_request(&path, &method, &query_string, body_bytes, &content_type);
    let response = state.engine.handle(&htex_request);

    tracing::debug!(
        "{} {} -> {} in {:?}",
        method,
        uri,
        response.status,
        start.elapsed()
    );

    htex_response_to_axum(response)
}

/// Converts request parts to an [`HtexRequest`], decoding the query string
/// and any urlencoded form body.
fn to_htex_request(
    path: &str,
    method: &Method,
    query_string: &str,
    body: Option<Vec<u8>>,
    content_type: &str,
) -> HtexRequest {
    let mut request = HtexRequest::new(path, method.as_str()).with_query_string(query_string);

    if let Some(body) = body {
        if content_type.starts_with("application/x-www-form-urlencoded") {
            request = request.with_form_body(&body);
        }
    }

    request
}

/// Converts an [`HtexResponse`] to an axum [`Response`].
fn htex_response_to_axum(response: HtexResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = axum::http::Response::builder().status(status);

    for (key, value) in &response.headers {
        builder = builder.header(key, value);
    }

    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response()
        })
}
