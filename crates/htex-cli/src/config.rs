// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! htex project configuration.
//!
//! Configuration is loaded from `htex.toml` at the project root. Every
//! field has a default, so the file is optional and may be partial.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! port = 3000
//! host = "127.0.0.1"
//!
//! [content]
//! root = "public"
//! keep_comments = false
//!
//! [gen]
//! output = "output"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure loaded from `htex.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Content tree settings.
    #[serde(default)]
    pub content: ContentConfig,
    /// Static export settings.
    #[serde(default)]
    pub gen: GenConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
}

/// Content tree configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Root directory served and scanned (default: "public").
    #[serde(default = "default_root")]
    pub root: String,
    /// Keep HTML comments in rendered output (default: false).
    #[serde(default)]
    pub keep_comments: bool,
}

/// Static export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GenConfig {
    /// Output directory of the export (default: "output").
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_root() -> String {
    "public".to_string()
}

fn default_output() -> String {
    "output".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            keep_comments: false,
        }
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

impl Config {
    /// Loads configuration from `htex.toml` in the current directory.
    ///
    /// Returns the defaults when no configuration file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("htex.toml"))
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
