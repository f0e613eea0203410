// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Template parser.
//!
//! Consumes tokenizer output and builds an [`HtexFile`]: text tokens become
//! [`ElemKind::Text`] elements, tag tokens are dispatched by name and read
//! their arguments according to the tag's arity. `<!layout>` recursively
//! parses its target and attaches it as the file's parent; a layout that
//! cannot be parsed aborts the whole parse. Unknown tags are a non-fatal
//! diagnostic and are skipped, as are extra arguments before a tag's `>`.

use std::fs;
use std::path::Path;

use crate::element::{Elem, ElemKind, HtexFile};
use crate::engine::Htex;
use crate::error::{HtexError, Result};
use crate::paths::resolve_reference;
use crate::token::{Scan, Scanner, Token};
use crate::values::Values;

impl Htex {
    /// Parses the `.htex` file at `path`, recursively parsing any layout
    /// it references.
    pub fn parse_file(&self, path: &Path) -> Result<HtexFile> {
        tracing::debug!("parse file {}", path.display());
        let data = fs::read(path).map_err(|source| HtexError::SourceNotFound {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_source(path, &data)
    }

    /// Parses template source already in memory. `path` names the file the
    /// bytes came from; relative `<!layout>` and `<!include-*>` references
    /// resolve against its directory.
    pub fn parse_source(&self, path: &Path, data: &[u8]) -> Result<HtexFile> {
        let mut file = HtexFile::new(path);
        let mut tokens = TokenStream::new(data, self.keep_comments());
        while let Some(token) = tokens.next() {
            match token {
                Token::Text(text) if !text.is_empty() => {
                    file.elems.push(Elem::text(lossy(text)));
                }
                Token::Text(_) => {}
                Token::TagOpen(name) => self.parse_tag(&mut file, &mut tokens, name)?,
                // A stray close or argument outside a tag is tolerated.
                Token::TagArg(_) | Token::TagClose => {}
            }
        }
        Ok(file)
    }

    /// Reads one tag's arguments and appends the resulting element, if any.
    fn parse_tag(&self, file: &mut HtexFile, tokens: &mut TokenStream<'_>, raw: &[u8]) -> Result<()> {
        let name = lossy(raw).to_ascii_lowercase();
        match name.as_str() {
            "<!layout" => {
                // Bare `<!layout>` attaches nothing.
                if let Some(target) = tokens.next_arg() {
                    let layout_path = resolve_reference(self.root(), &file.path, &target);
                    let layout = self.parse_file(&layout_path).map_err(|err| {
                        HtexError::LayoutParseFailure {
                            path: target.clone(),
                            source: Box::new(err),
                        }
                    })?;
                    file.layout = Some(Box::new(layout));
                    tokens.skip_to_close();
                }
            }
            "<!content" => {
                file.elems.push(Elem::new(ElemKind::Content, ""));
                tokens.skip_to_close();
            }
            "<!get" => {
                if let Some(var) = tokens.next_arg() {
                    file.elems.push(Elem::new(ElemKind::Get, var));
                    tokens.skip_to_close();
                }
            }
            "<!set" => {
                if let Some(var) = tokens.next_arg() {
                    // Zero value words mean "clear the variable".
                    let mut values: Option<Values> = None;
                    while let Some(value) = tokens.next_arg() {
                        values.get_or_insert_with(Values::new).add(var.as_str(), value);
                    }
                    file.elems.push(Elem::with_values(ElemKind::Set, var, values));
                }
            }
            "<!url" => {
                file.elems.push(Elem::new(ElemKind::Url, ""));
                tokens.skip_to_close();
            }
            "<!data" => {
                if let Some(param) = tokens.next_arg() {
                    file.elems.push(Elem::new(ElemKind::Data, param));
                    tokens.skip_to_close();
                }
            }
            "<!query" => {
                // An absent key means "the whole raw query string".
                match tokens.next_arg() {
                    Some(key) => {
                        file.elems.push(Elem::new(ElemKind::Query, key));
                        tokens.skip_to_close();
                    }
                    None => file.elems.push(Elem::new(ElemKind::Query, "")),
                }
            }
            "<!method" => {
                let mut method = String::new();
                let mut values: Option<Values> = None;
                if let Some(arg) = tokens.next_arg() {
                    method = arg.to_ascii_lowercase();
                    while let Some(word) = tokens.next_arg() {
                        let (key, value) = match word.split_once('=') {
                            Some((key, value)) => (key.to_string(), value.to_string()),
                            None => (word, String::new()),
                        };
                        values.get_or_insert_with(Values::new).add(key, value);
                    }
                }
                file.elems.push(Elem::with_values(ElemKind::Method, method, values));
            }
            "<!include-raw" | "<!include-escaped" | "<!include-markdown" => {
                let kind = match name.as_str() {
                    "<!include-raw" => ElemKind::IncludeRaw,
                    "<!include-escaped" => ElemKind::IncludeEscaped,
                    _ => ElemKind::IncludeMarkdown,
                };
                if let Some(target) = tokens.next_arg() {
                    file.elems.push(Elem::new(kind, target));
                    tokens.skip_to_close();
                }
            }
            _ => {
                tracing::warn!("invalid htex element {}", lossy(raw));
                tokens.skip_to_close();
            }
        }
        Ok(())
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Drives the [`Scanner`] over a complete in-memory source.
struct TokenStream<'s> {
    scanner: Scanner,
    data: &'s [u8],
    pos: usize,
}

impl<'s> TokenStream<'s> {
    fn new(data: &'s [u8], keep_comments: bool) -> Self {
        Self {
            scanner: Scanner::new(keep_comments),
            data,
            pos: 0,
        }
    }

    fn next(&mut self) -> Option<Token<'s>> {
        loop {
            let data: &'s [u8] = self.data;
            match self.scanner.next(&data[self.pos..], true) {
                Scan::Token { consumed, token } => {
                    self.pos += consumed;
                    return Some(token);
                }
                Scan::Skip { consumed } => self.pos += consumed,
                Scan::More | Scan::Done => return None,
            }
        }
    }

    /// Next argument of the current tag, or `None` when the tag closes (or
    /// the input ends) first. The closing token, if seen, is consumed.
    fn next_arg(&mut self) -> Option<String> {
        match self.next() {
            Some(Token::TagArg(arg)) => Some(lossy(arg)),
            _ => None,
        }
    }

    /// Drops everything up to and including the tag's closing token.
    fn skip_to_close(&mut self) {
        while let Some(token) = self.next() {
            if matches!(token, Token::TagClose) {
                return;
            }
        }
    }
}
