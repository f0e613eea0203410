// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Per-request rendering.
//!
//! A parsed file renders outward-in: the layout chain is walked first,
//! and each `<!content>` slot fills in the next inner file, down to the
//! requested page. The pending inner files form a small stack of
//! [`ContentSlot`]s threaded through the recursion. One variable scope is
//! shared by the whole chain and dropped when the render finishes.
//!
//! `<!method>` elements flip a per-file skipping flag: elements after a
//! non-matching filter produce no output until a matching filter (or
//! `<!method any>`) resumes them.

use std::collections::HashMap;
use std::fs;

use crate::element::{Elem, ElemKind, HtexFile};
use crate::engine::Htex;
use crate::markdown::markdown_to_html;
use crate::paths::{clean_url_path, resolve_reference};
use crate::request::HtexRequest;
use crate::values::Values;

/// The pending content for a `<!content>` slot: nothing (the file was
/// requested directly), or the next inner file plus its own slot.
enum ContentSlot<'a> {
    Empty,
    Page {
        file: &'a HtexFile,
        rest: &'a ContentSlot<'a>,
    },
}

impl Htex {
    /// Renders `file` against `request`, appending output bytes to `out`.
    pub fn render(&self, file: &HtexFile, request: &HtexRequest, out: &mut Vec<u8>) {
        let mut vars = HashMap::new();
        self.write_file(file, true, request, &mut vars, out, &ContentSlot::Empty);
    }

    fn write_file(
        &self,
        file: &HtexFile,
        with_layout: bool,
        request: &HtexRequest,
        vars: &mut HashMap<String, String>,
        out: &mut Vec<u8>,
        content: &ContentSlot<'_>,
    ) {
        if with_layout {
            if let Some(layout) = &file.layout {
                // The layout renders first; this file becomes the content
                // filling the layout's `<!content>` slot.
                let slot = ContentSlot::Page {
                    file,
                    rest: content,
                };
                return self.write_file(layout, true, request, vars, out, &slot);
            }
        }

        let method = request.method.to_ascii_lowercase();
        let mut skipping = false;
        for elem in &file.elems {
            if elem.kind == ElemKind::Method {
                let matches = elem.text == "any"
                    || (elem.text == method
                        && elem
                            .values
                            .as_ref()
                            .map_or(true, |required| constraints_match(required, &request.query)));
                skipping = !matches;
                continue;
            }
            if skipping {
                continue;
            }
            match elem.kind {
                ElemKind::Text => out.extend_from_slice(elem.text.as_bytes()),
                ElemKind::Content => match content {
                    // A dangling `<!content>` (layout requested directly)
                    // renders nothing.
                    ContentSlot::Empty => {}
                    ContentSlot::Page { file: page, rest } => {
                        self.write_file(page, false, request, vars, out, rest);
                    }
                },
                ElemKind::Get => {
                    if let Some(value) = vars.get(&elem.text) {
                        out.extend_from_slice(value.as_bytes());
                    }
                }
                ElemKind::Set => match &elem.values {
                    Some(values) => {
                        if let Some(value) = values.first(&elem.text) {
                            vars.insert(elem.text.clone(), value.to_string());
                        }
                    }
                    None => {
                        vars.remove(&elem.text);
                    }
                },
                ElemKind::Url => out.extend_from_slice(clean_url_path(&request.path).as_bytes()),
                ElemKind::Data => {
                    if let Some(value) = request.form.first(&elem.text) {
                        out.extend_from_slice(value.as_bytes());
                    }
                }
                ElemKind::Query => {
                    if elem.text.is_empty() {
                        out.extend_from_slice(request.raw_query.as_bytes());
                    } else if let Some(value) = request.query.first(&elem.text) {
                        out.extend_from_slice(value.as_bytes());
                    }
                }
                ElemKind::IncludeRaw | ElemKind::IncludeEscaped | ElemKind::IncludeMarkdown => {
                    self.write_include(file, elem, out);
                }
                ElemKind::Method => unreachable!("handled above"),
            }
        }
    }

    fn write_include(&self, file: &HtexFile, elem: &Elem, out: &mut Vec<u8>) {
        let path = resolve_reference(self.root(), &file.path, &elem.text);
        match fs::read(&path) {
            Ok(bytes) => match elem.kind {
                ElemKind::IncludeEscaped => out.extend_from_slice(&escape_html(&bytes)),
                ElemKind::IncludeMarkdown => out.extend_from_slice(&markdown_to_html(&bytes)),
                _ => out.extend_from_slice(&bytes),
            },
            // Nothing is written for an unreadable include target.
            Err(err) => tracing::warn!("cannot include {}: {}", path.display(), err),
        }
    }
}

/// True when every constrained key is present in the query and, where a
/// value was given, equal to the query's first value for that key.
fn constraints_match(required: &Values, query: &Values) -> bool {
    for (key, values) in required.iter() {
        if !query.has(key) {
            return false;
        }
        let expected = values.first().map(String::as_str).unwrap_or_default();
        if !expected.is_empty() && query.first(key) != Some(expected) {
            return false;
        }
    }
    true
}

/// Escapes `&`, `<`, `>`, `"` and `'` for embedding in HTML.
fn escape_html(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    for &byte in input {
        match byte {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&#34;"),
            b'\'' => out.extend_from_slice(b"&#39;"),
            _ => out.push(byte),
        }
    }
    out
}
