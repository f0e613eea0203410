// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Markdown to HTML conversion for `<!include-markdown>`.

use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown bytes to HTML bytes.
///
/// A pure transform: invalid UTF-8 is replaced rather than rejected, and
/// the common extensions (tables, footnotes, strikethrough, task lists)
/// are enabled.
pub fn markdown_to_html(input: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(input);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(&text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out.into_bytes()
}
