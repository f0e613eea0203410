// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for serving and exporting a content tree.
//!
//! These tests drive the engine exactly as the serve and gen commands do,
//! over a realistic project layout.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use htex::{Htex, HtexRequest};
use htex_cli::config::Config;

/// Create a small site in a temp directory.
fn setup_site(root: &Path) {
    fs::create_dir_all(root.join("blog")).unwrap();
    fs::create_dir_all(root.join("contact")).unwrap();

    fs::write(
        root.join("base.htex"),
        "<!doctype html>\n<html><body><header>site</header><!content></body></html>",
    )
    .unwrap();

    fs::write(
        root.join("index.htex"),
        "<!layout /base.htex><h1>Home</h1>",
    )
    .unwrap();

    fs::write(
        root.join("blog").join("index.htex"),
        "<!layout /base.htex><h1>Blog</h1><!include-markdown intro.md>",
    )
    .unwrap();
    fs::write(root.join("blog").join("intro.md"), "*welcome*").unwrap();

    fs::write(
        root.join("contact").join("index.htex"),
        "<!layout /base.htex>\
         <!method get><form method=post><input name=email></form>\
         <!method post>Thanks, <!data email>!",
    )
    .unwrap();

    fs::write(root.join("style.css"), "body { margin: 0 }").unwrap();
}

fn get(engine: &Htex, path: &str) -> String {
    let response = engine.handle(&HtexRequest::new(path, "GET"));
    assert_eq!(response.status, 200, "GET {path}");
    String::from_utf8(response.body).unwrap()
}

#[test]
fn test_serving_a_full_site() {
    let dir = tempdir().unwrap();
    setup_site(dir.path());
    let engine = Htex::new(dir.path());

    let home = get(&engine, "/");
    assert!(home.starts_with("<!doctype html>"), "doctype survives: {home}");
    assert!(home.contains("<header>site</header>"));
    assert!(home.contains("<h1>Home</h1>"));

    let blog = get(&engine, "/blog");
    assert!(blog.contains("<em>welcome</em>"), "markdown include: {blog}");

    let css = get(&engine, "/style.css");
    assert_eq!(css, "body { margin: 0 }");
}

#[test]
fn test_method_dispatch_on_one_file() {
    let dir = tempdir().unwrap();
    setup_site(dir.path());
    let engine = Htex::new(dir.path());

    let form = get(&engine, "/contact");
    assert!(form.contains("<form"));
    assert!(!form.contains("Thanks"));

    let request = HtexRequest::new("/contact", "POST").with_form_body(b"email=a%40b.c");
    let response = engine.handle(&request);
    let body = String::from_utf8(response.body).unwrap();
    assert!(body.contains("Thanks, a@b.c!"), "post branch: {body}");
    assert!(!body.contains("<form"));
}

#[test]
fn test_sources_and_hidden_paths_stay_private() {
    let dir = tempdir().unwrap();
    setup_site(dir.path());
    fs::create_dir(dir.path().join(".secret")).unwrap();
    fs::write(dir.path().join(".secret").join("key"), "k").unwrap();
    let engine = Htex::new(dir.path());

    assert_eq!(engine.handle(&HtexRequest::new("/index.htex", "GET")).status, 404);
    assert_eq!(engine.handle(&HtexRequest::new("/.secret/key", "GET")).status, 404);
}

#[test]
fn test_static_export_matches_serving() {
    let dir = tempdir().unwrap();
    setup_site(dir.path());
    let engine = Htex::new(dir.path());

    let out = tempdir().unwrap();
    let stats = engine.generate_static(out.path()).unwrap();
    assert_eq!(stats.pages, 4); // base, index, blog/index, contact/index
    assert_eq!(stats.files, 2); // style.css, blog/intro.md

    // The exported home page equals the served one.
    let served = get(&engine, "/");
    let exported = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert_eq!(served, exported);

    assert!(out.path().join("blog").join("index.html").exists());
    assert!(out.path().join("style.css").exists());

    // An export is itself servable: the generated index.html answers "/".
    let exported_engine = Htex::new(out.path());
    let response = exported_engine.handle(&HtexRequest::new("/", "GET"));
    assert_eq!(response.status, 200);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("text/html; charset=utf-8")
    );
}

#[test]
fn test_config_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("htex.toml");
    fs::write(&path, "[content]\nroot = \"site\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.content.root, "site");
    assert_eq!(config.server.port, 3000);
}
