// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Content server command.
//!
//! Serves the content root over HTTP. Every request is routed and rendered
//! by the engine; there is no caching, so template edits are picked up on
//! the next request. TLS termination is left to a fronting proxy.

use anyhow::bail;
use console::style;
use htex::Htex;

use crate::config::Config;
use crate::server;

/// Runs the content server. CLI arguments override `htex.toml`.
pub async fn run(
    host: Option<String>,
    port: Option<u16>,
    root: Option<String>,
    keep_comments: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let root = root.unwrap_or(config.content.root);
    let keep_comments = keep_comments || config.content.keep_comments;

    let root = match std::fs::canonicalize(&root) {
        Ok(path) if path.is_dir() => path,
        _ => bail!("cannot open directory: {root}"),
    };

    let engine = Htex::new(&root).with_keep_comments(keep_comments);

    let addr = format!("{host}:{port}");
    println!(
        "{} {} {} {}",
        style("htex server at").green().bold(),
        style(format!("http://{addr}")).cyan().underlined(),
        style("for").dim(),
        root.display()
    );
    println!("{}", style("Press Ctrl+C to stop").dim());

    server::http::create_server(&addr, engine).await
}
