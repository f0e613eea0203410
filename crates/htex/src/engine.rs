// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template engine entry points.
//!
//! [`Htex`] holds the engine configuration (content root, comment mode)
//! and dispatches requests: the router decides which on-disk file answers
//! a URL, then the file is either streamed out statically or parsed and
//! rendered. The engine keeps no mutable state, so one instance can serve
//! any number of concurrent requests; every render gets a fresh parse tree
//! and a fresh variable scope.

use std::fs;
use std::path::{Path, PathBuf};

use crate::request::HtexRequest;
use crate::response::HtexResponse;
use crate::router::{resolve, Resolution};

/// The htex template engine.
#[derive(Debug, Clone)]
pub struct Htex {
    root: PathBuf,
    keep_comments: bool,
}

impl Htex {
    /// Creates an engine serving the content tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            keep_comments: false,
        }
    }

    /// Keeps HTML comments in the output instead of discarding them.
    pub fn with_keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// The configured content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether HTML comments are kept in the output.
    pub fn keep_comments(&self) -> bool {
        self.keep_comments
    }

    /// Answers one request: resolves the URL to a file and serves it,
    /// statically or by parsing and rendering a `.htex` source.
    pub fn handle(&self, request: &HtexRequest) -> HtexResponse {
        match resolve(&self.root, &request.path) {
            Resolution::Static(path) => {
                tracing::debug!("static file {}", path.display());
                self.serve_static(&path, content_type_for(&path))
            }
            Resolution::StaticHtml(path) => {
                tracing::debug!("static file {}", path.display());
                self.serve_static(&path, "text/html; charset=utf-8")
            }
            Resolution::Dynamic(path) => {
                tracing::debug!("dynamic file {}", path.display());
                self.serve_dynamic(&path, request)
            }
            Resolution::NotFound => HtexResponse::not_found(),
        }
    }

    fn serve_dynamic(&self, path: &Path, request: &HtexRequest) -> HtexResponse {
        match self.parse_file(path) {
            Ok(file) => {
                let mut body = Vec::new();
                self.render(&file, request, &mut body);
                HtexResponse::html(body)
            }
            Err(err) => {
                tracing::error!("render of {} failed: {}", path.display(), err);
                HtexResponse::internal_error()
            }
        }
    }

    fn serve_static(&self, path: &Path, content_type: &str) -> HtexResponse {
        match fs::read(path) {
            Ok(body) => HtexResponse::bytes(body, content_type),
            Err(err) => {
                tracing::warn!("cannot read static file {}: {}", path.display(), err);
                HtexResponse::not_found()
            }
        }
    }
}

/// Content type inferred from the file extension.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "text/xml; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("index.htex"), "home:<!url>").unwrap();
        fs::write(root.join("style.css"), "body{}").unwrap();
        fs::write(root.join("about.html"), "<p>about</p>").unwrap();
        fs::write(root.join("plain"), "plain bytes").unwrap();
        fs::write(root.join("plain.htex"), "shadowed").unwrap();
        fs::create_dir(root.join("app")).unwrap();
        fs::write(root.join("app").join("_.htex"), "wild:<!url>").unwrap();
        dir
    }

    fn get(engine: &Htex, path: &str) -> HtexResponse {
        engine.handle(&HtexRequest::new(path, "GET"))
    }

    #[test]
    fn test_dynamic_index() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body, b"home:/");
    }

    #[test]
    fn test_static_file_content_type() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/style.css");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/css; charset=utf-8")
        );
        assert_eq!(response.body, b"body{}");
    }

    #[test]
    fn test_static_file_wins_over_htex() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/plain");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"plain bytes");
    }

    #[test]
    fn test_htex_source_is_not_served() {
        let dir = site();
        let engine = Htex::new(dir.path());
        assert_eq!(get(&engine, "/plain.htex").status, 404);
        assert_eq!(get(&engine, "/index.htex").status, 404);
    }

    #[test]
    fn test_html_fallback() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/about");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body, b"<p>about</p>");
    }

    #[test]
    fn test_wildcard_sees_original_url() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/app/users");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"wild:/app/users");
    }

    #[test]
    fn test_not_found() {
        let dir = site();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/nope");
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_broken_layout_is_internal_error() {
        let dir = site();
        fs::write(dir.path().join("bad.htex"), "<!layout missing.htex>x").unwrap();
        let engine = Htex::new(dir.path());
        let response = get(&engine, "/bad");
        assert_eq!(response.status, 500);
    }
}
