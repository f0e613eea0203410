// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP request abstraction for the htex engine.
//!
//! A platform-agnostic request type that adapters (HTTP servers, the
//! static generator, tests) fill in and hand to the engine. The engine
//! reads it; it never mutates a request.

use crate::values::Values;

/// A platform-agnostic HTTP request.
///
/// # Example
///
/// ```rust
/// use htex::HtexRequest;
///
/// let request = HtexRequest::new("/blog/hello", "GET")
///     .with_query_string("page=1");
/// assert_eq!(request.query.first("page"), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct HtexRequest {
    /// The HTTP method (e.g. "GET", "POST").
    pub method: String,
    /// The request URL path (e.g. "/blog/hello").
    pub path: String,
    /// The raw, undecoded query string (without the leading `?`).
    pub raw_query: String,
    /// Decoded query parameters.
    pub query: Values,
    /// Decoded form fields posted in the request body.
    pub form: Values,
}

impl HtexRequest {
    /// Creates a request with the given path and method.
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            raw_query: String::new(),
            query: Values::new(),
            form: Values::new(),
        }
    }

    /// Sets the query from a raw query string (percent-decoded into the
    /// query map; kept verbatim for `<!query>` without a key).
    pub fn with_query_string(mut self, raw: &str) -> Self {
        self.raw_query = raw.to_string();
        self.query = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self
    }

    /// Sets already-decoded form fields.
    pub fn with_form(mut self, form: Values) -> Self {
        self.form = form;
        self
    }

    /// Decodes an `application/x-www-form-urlencoded` body into the form
    /// fields.
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.form = form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self
    }
}

impl Default for HtexRequest {
    fn default() -> Self {
        Self::new("/", "GET")
    }
}
