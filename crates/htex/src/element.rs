// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Parsed template representation.
//!
//! A template file parses into an ordered sequence of [`Elem`]s plus an
//! optional parent layout. The layout edge is an owned tree: every parse
//! owns its layout's parse exclusively, and the whole tree is rebuilt per
//! request (the data is immutable render input, so re-parsing trades CPU
//! for hot reload of edits).

use std::path::{Path, PathBuf};

use crate::values::Values;

/// The kind of one parsed template element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemKind {
    /// A literal text run.
    Text,
    /// `<!content>` — the slot a layout fills with its page.
    Content,
    /// `<!get name>` — write a render variable.
    Get,
    /// `<!set name value...>` — set or clear a render variable.
    Set,
    /// `<!url>` — write the cleaned request URL path.
    Url,
    /// `<!method name [key[=value] ...]>` — method/query content filter.
    Method,
    /// `<!data name>` — write a posted form field.
    Data,
    /// `<!query [key]>` — write a query parameter or the raw query string.
    Query,
    /// `<!include-raw path>` — include a file verbatim.
    IncludeRaw,
    /// `<!include-escaped path>` — include a file, HTML-escaped.
    IncludeEscaped,
    /// `<!include-markdown path>` — include a file, converted from Markdown.
    IncludeMarkdown,
}

/// One parsed, typed unit of a template file.
#[derive(Debug, Clone, PartialEq)]
pub struct Elem {
    /// What this element does.
    pub kind: ElemKind,
    /// Tag-specific payload: literal text for [`ElemKind::Text`], a
    /// variable/parameter name for get/set/data/query, the lowercased
    /// method name for [`ElemKind::Method`], a file path for includes.
    pub text: String,
    /// Extra payload: the value list for [`ElemKind::Set`], the query
    /// constraints for [`ElemKind::Method`].
    pub values: Option<Values>,
}

impl Elem {
    /// Creates an element with no extra values.
    pub fn new(kind: ElemKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            values: None,
        }
    }

    /// Creates a literal text element.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ElemKind::Text, text)
    }

    /// Creates an element carrying a value map.
    pub fn with_values(kind: ElemKind, text: impl Into<String>, values: Option<Values>) -> Self {
        Self {
            kind,
            text: text.into(),
            values,
        }
    }
}

/// A parsed `.htex` file: its elements and, if it declared `<!layout>`,
/// the parsed parent template.
#[derive(Debug, Clone, PartialEq)]
pub struct HtexFile {
    /// The source path the file was parsed from, used to resolve relative
    /// `<!layout>` and `<!include-*>` references.
    pub path: PathBuf,
    /// The parsed elements in document order.
    pub elems: Vec<Elem>,
    /// The parsed layout file, if any. Owned; never shared between parses.
    pub layout: Option<Box<HtexFile>>,
}

impl HtexFile {
    /// Creates an empty file rooted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            elems: Vec::new(),
            layout: None,
        }
    }

    /// The directory containing this file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}
