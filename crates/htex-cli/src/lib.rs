// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! htex CLI library.
//!
//! The command-line interface for the htex templating engine: a content
//! server (`htex serve`) and a static-site exporter (`htex gen`).
//!
//! # Usage
//!
//! ```bash
//! htex serve     # serve the content root over HTTP
//! htex gen       # export the content root as a static site
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `htex.toml` at the project root; CLI flags
//! override the file.

/// CLI commands (serve, gen).
pub mod commands;
/// Project configuration from `htex.toml`.
pub mod config;
/// HTTP server adapter.
pub mod server;
