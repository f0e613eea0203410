// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Content-root scanning.
//!
//! Walks the content tree and classifies every file as dynamic (a `.htex`
//! source, reported with the URL it answers) or static (reported with its
//! root-relative path). The same classification feeds the live server's
//! generation mode and the offline static export.

use std::io;
use std::path::Path;

/// Walks `root` and invokes `dynamic(path, url)` for every `.htex` file
/// and `static_file(path, relative)` for everything else.
///
/// The URL for a dynamic file is its root-relative path without the
/// extension; a trailing `/index` collapses to `/`, so `blog/index.htex`
/// answers `/blog/`. Hidden entries (names starting with `.`, except
/// `.well-known`) are skipped, matching the server's routing policy.
/// Entries are visited in lexical order.
pub fn scan_files<D, S>(root: &Path, mut dynamic: D, mut static_file: S) -> io::Result<()>
where
    D: FnMut(&Path, &str),
    S: FnMut(&Path, &str),
{
    walk(root, root, &mut dynamic, &mut static_file)
}

fn walk<D, S>(root: &Path, dir: &Path, dynamic: &mut D, static_file: &mut S) -> io::Result<()>
where
    D: FnMut(&Path, &str),
    S: FnMut(&Path, &str),
{
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') && name != ".well-known" {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk(root, &path, dynamic, static_file)?;
            continue;
        }

        let rel = relative_url(root, &path);
        if path.extension().and_then(|e| e.to_str()) == Some("htex") {
            let mut url = rel[..rel.len() - ".htex".len()].to_string();
            if url.ends_with("/index") {
                url.truncate(url.len() - "index".len());
            }
            dynamic(&path, &url);
        } else {
            static_file(&path, &rel);
        }
    }
    Ok(())
}

/// Root-relative path as a `/`-separated URL with a leading slash.
fn relative_url(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", segments.join("/"))
}
