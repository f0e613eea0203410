// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP response abstraction for the htex engine.
//!
//! The engine returns one of these after handling a request; adapters
//! convert it to their platform's response format. Headers the engine
//! cares about (`Content-Type`) are set before any body bytes exist.

use std::collections::HashMap;

/// A platform-agnostic HTTP response.
#[derive(Debug, Clone, Default)]
pub struct HtexResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HtexResponse {
    /// Creates an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 response with an HTML body.
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::bytes(body, "text/html; charset=utf-8")
    }

    /// Creates a 200 response with the given body and content type.
    pub fn bytes(body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        Self::new(200)
            .with_header("Content-Type", content_type)
            .with_body(body)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::new(404)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body("404 page not found\n")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::new(500)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body("500 internal error\n")
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for a 4xx or 5xx status.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}
