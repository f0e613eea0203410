// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! URL and filesystem path handling.

use std::path::{Path, PathBuf};

/// Lexically cleans a URL path: collapses repeated slashes, resolves `.`
/// and `..` segments, and drops any trailing slash. A rooted input stays
/// rooted; an empty input cleans to `.`.
pub fn clean_url_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    // Number of leading `..` segments that cannot be popped away.
    let mut dotdot = 0;
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.len() > dotdot {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                    dotdot = segments.len();
                }
            }
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        return if rooted { "/".to_string() } else { ".".to_string() };
    }
    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Resolves a path referenced from a template file: a `/`-prefixed
/// reference is relative to the content root, anything else is relative to
/// the directory of the referencing file.
pub fn resolve_reference(root: &Path, relative_to: &Path, reference: &str) -> PathBuf {
    if let Some(rooted) = reference.strip_prefix('/') {
        root.join(rooted)
    } else {
        relative_to
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(reference)
    }
}
