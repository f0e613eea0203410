// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # htex
//!
//! Minimal hypertext templating engine for `.htex` files.
//!
//! An `.htex` file is ordinary HTML plus a small set of `<!...>` directives
//! (`<!layout>`, `<!content>`, `<!method>`, `<!get>`/`<!set>`, `<!url>`,
//! `<!query>`, `<!data>` and the `<!include-*>` family). A file is parsed
//! into a flat sequence of typed elements with an optional parent layout,
//! then rendered against one HTTP request. Parsing happens on every request;
//! there is no cross-request cache, so edits are picked up immediately.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use htex::{Htex, HtexRequest};
//!
//! let engine = Htex::new("./public");
//! let request = HtexRequest::new("/blog/hello", "GET");
//! let response = engine.handle(&request);
//! assert!(response.is_success());
//! ```

/// Parsed template representation (elements and files).
pub mod element;
/// Template engine entry points and request dispatch.
pub mod engine;
/// Error types.
pub mod error;
/// Static-site generation.
pub mod gen;
/// Markdown to HTML conversion.
pub mod markdown;
/// Template parser.
pub mod parser;
/// URL and filesystem path handling.
pub mod paths;
/// Per-request rendering.
pub mod render;
/// HTTP request abstraction for the engine.
pub mod request;
/// HTTP response abstraction for the engine.
pub mod response;
/// URL to file resolution.
pub mod router;
/// Content-root scanning shared by serving and generation.
pub mod scan;
/// `.htex` tokenizer.
pub mod token;
/// Ordered multi-map used for tag payloads, queries and forms.
pub mod values;

pub use element::{Elem, ElemKind, HtexFile};
pub use engine::Htex;
pub use error::{HtexError, Result};
pub use gen::GenStats;
pub use markdown::markdown_to_html;
pub use request::HtexRequest;
pub use response::HtexResponse;
pub use router::{resolve, Resolution};
pub use scan::scan_files;
pub use token::{Scan, Scanner, Token};
pub use values::Values;
