// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the htex engine.
//!
//! Only failures that abort a render are represented here: a source file
//! that cannot be opened, or a `<!layout>` target that cannot be parsed.
//! Recoverable problems (unknown tags, unreadable include targets) are
//! reported as `tracing` diagnostics and the render continues without them.

use thiserror::Error;

/// The main error type for htex operations.
#[derive(Error, Debug)]
pub enum HtexError {
    /// The template source file could not be opened.
    #[error("cannot open source file {path}: {source}")]
    SourceNotFound {
        /// The path that failed to open.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A `<!layout>` target could not be parsed.
    #[error("cannot parse layout {path}: {source}")]
    LayoutParseFailure {
        /// The layout path as written in the referencing file.
        path: String,
        /// The error raised while parsing the layout.
        source: Box<HtexError>,
    },

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for Results with [`HtexError`].
pub type Result<T> = std::result::Result<T, HtexError>;
