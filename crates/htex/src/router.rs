// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! URL to file resolution.
//!
//! Decides which on-disk file answers a URL path, in precedence order:
//!
//! 1. Direct `.htex` requests and hidden path segments (except
//!    `/.well-known`) are rejected.
//! 2. An existing regular file is served statically.
//! 3. A directory is treated as `<dir>/index`.
//! 4. `<target>.htex` renders dynamically.
//! 5. `<dir-of-target>/_.htex` is the wildcard catch-all; the original URL
//!    stays visible to the render through the request context.
//! 6. `<target>.html` is the static fallback (pre-generated index pages).
//! 7. Otherwise 404.

use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::clean_url_path;

/// How a URL path maps onto the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve this existing file as static bytes.
    Static(PathBuf),
    /// Parse and render this `.htex` source.
    Dynamic(PathBuf),
    /// Serve this `.html` fallback as static HTML.
    StaticHtml(PathBuf),
    /// Nothing answers the URL.
    NotFound,
}

/// Resolves a URL path against the content root.
pub fn resolve(root: &Path, url_path: &str) -> Resolution {
    let url = clean_url_path(url_path);

    // Dynamic sources are never served as their own static representation.
    if url.ends_with(".htex") {
        return Resolution::NotFound;
    }

    // Hidden folders/files stay private, except "/.well-known" which is
    // used to verify domains and certificates.
    if url.contains("/.") && !url.starts_with("/.well-known") {
        tracing::debug!("ignore hidden path {url}");
        return Resolution::NotFound;
    }

    let mut target = root.join(url.trim_start_matches('/'));
    match fs::metadata(&target) {
        Ok(meta) if meta.is_file() => return Resolution::Static(target),
        Ok(meta) if meta.is_dir() => target = target.join("index"),
        _ => {}
    }

    let dynamic = append_suffix(&target, ".htex");
    if is_file(&dynamic) {
        return Resolution::Dynamic(dynamic);
    }

    let wildcard = target
        .parent()
        .unwrap_or(root)
        .join("_.htex");
    if is_file(&wildcard) {
        return Resolution::Dynamic(wildcard);
    }

    let fallback = append_suffix(&target, ".html");
    if is_file(&fallback) {
        return Resolution::StaticHtml(fallback);
    }

    Resolution::NotFound
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("index.htex"), "home").unwrap();
        fs::write(root.join("about.htex"), "about").unwrap();
        fs::write(root.join("about.html"), "pre-generated").unwrap();
        fs::write(root.join("legal.html"), "legal").unwrap();
        fs::write(root.join("style.css"), "body{}").unwrap();
        fs::write(root.join("page"), "static page").unwrap();
        fs::write(root.join("page.htex"), "dynamic page").unwrap();
        fs::create_dir(root.join("blog")).unwrap();
        fs::write(root.join("blog").join("index.htex"), "blog home").unwrap();
        fs::create_dir(root.join("app")).unwrap();
        fs::write(root.join("app").join("_.htex"), "wildcard").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git").join("config"), "secret").unwrap();
        fs::create_dir(root.join(".well-known")).unwrap();
        fs::write(root.join(".well-known").join("token"), "ok").unwrap();
        dir
    }

    #[test]
    fn test_htex_sources_are_rejected() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "/page.htex"), Resolution::NotFound);
        assert_eq!(resolve(dir.path(), "/index.htex"), Resolution::NotFound);
    }

    #[test]
    fn test_hidden_paths_are_rejected() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "/.git/config"), Resolution::NotFound);
        // Cleaning happens before the check.
        assert_eq!(resolve(dir.path(), "/blog/../.git/config"), Resolution::NotFound);
    }

    #[test]
    fn test_well_known_is_allowed() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/.well-known/token"),
            Resolution::Static(dir.path().join(".well-known").join("token"))
        );
    }

    #[test]
    fn test_existing_static_file_wins() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/style.css"),
            Resolution::Static(dir.path().join("style.css"))
        );
        // A static file shadows same-named .htex and .html counterparts.
        assert_eq!(
            resolve(dir.path(), "/page"),
            Resolution::Static(dir.path().join("page"))
        );
    }

    #[test]
    fn test_directory_maps_to_index() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/"),
            Resolution::Dynamic(dir.path().join("index.htex"))
        );
        assert_eq!(
            resolve(dir.path(), "/blog"),
            Resolution::Dynamic(dir.path().join("blog").join("index.htex"))
        );
    }

    #[test]
    fn test_htex_wins_over_html_fallback() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/about"),
            Resolution::Dynamic(dir.path().join("about.htex"))
        );
    }

    #[test]
    fn test_html_fallback() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/legal"),
            Resolution::StaticHtml(dir.path().join("legal.html"))
        );
    }

    #[test]
    fn test_wildcard_handler() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/app/users"),
            Resolution::Dynamic(dir.path().join("app").join("_.htex"))
        );
        // The wildcard only covers its own directory, not deeper paths.
        assert_eq!(resolve(dir.path(), "/app/users/42"), Resolution::NotFound);
    }

    #[test]
    fn test_not_found() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "/nope"), Resolution::NotFound);
    }
}
