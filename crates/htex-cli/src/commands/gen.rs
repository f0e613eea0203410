// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Static export command.
//!
//! Walks the content root, renders every `.htex` page against a synthetic
//! GET request into `<output>/<url>/index.html`, and copies static files
//! verbatim.

use anyhow::bail;
use console::style;
use htex::Htex;
use std::path::PathBuf;

use crate::config::Config;

/// Runs the static export. CLI arguments override `htex.toml`.
pub fn run(root: Option<String>, output: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let root = root.unwrap_or(config.content.root);
    let output = PathBuf::from(output.unwrap_or(config.gen.output));

    let root = match std::fs::canonicalize(&root) {
        Ok(path) if path.is_dir() => path,
        _ => bail!("cannot open directory: {root}"),
    };

    println!(
        "{} {} {} {}",
        style("Generating static content from").cyan(),
        root.display(),
        style("into").cyan(),
        output.display()
    );

    let engine = Htex::new(&root).with_keep_comments(config.content.keep_comments);
    let stats = engine.generate_static(&output)?;

    println!(
        "{} {} page(s) rendered, {} file(s) copied",
        style("Done:").green().bold(),
        stats.pages,
        stats.files
    );
    Ok(())
}
