// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Static-site generation.
//!
//! Renders every `.htex` file under the content root against a synthetic
//! GET request for its URL, writing the result to
//! `<output>/<url>/index.html`, and copies every static file verbatim.
//! Pages that fail to render are reported and skipped; the export
//! continues.

use std::fs;
use std::io;
use std::path::Path;

use crate::engine::Htex;
use crate::error::Result;
use crate::request::HtexRequest;
use crate::scan::scan_files;

/// Counts of what a static export produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenStats {
    /// Pages rendered from `.htex` sources.
    pub pages: usize,
    /// Static files copied verbatim.
    pub files: usize,
}

impl Htex {
    /// Exports the content root as a static site into `output_dir`.
    pub fn generate_static(&self, output_dir: &Path) -> Result<GenStats> {
        let mut pages = 0;
        let mut files = 0;
        scan_files(
            self.root(),
            |source, url| match self.generate_page(source, url, output_dir) {
                Ok(()) => pages += 1,
                Err(err) => tracing::warn!("cannot generate {}: {}", source.display(), err),
            },
            |source, rel| match copy_static(source, rel, output_dir) {
                Ok(()) => files += 1,
                Err(err) => tracing::warn!("cannot copy {}: {}", source.display(), err),
            },
        )?;
        Ok(GenStats { pages, files })
    }

    fn generate_page(&self, source: &Path, url: &str, output_dir: &Path) -> Result<()> {
        let out_path = output_dir
            .join(url.trim_start_matches('/'))
            .join("index.html");
        tracing::info!("{} -> {}", source.display(), out_path.display());
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = self.parse_file(source)?;
        // Each page is exported as if fetched with GET.
        let request = HtexRequest::new(url, "GET");
        let mut body = Vec::new();
        self.render(&file, &request, &mut body);
        fs::write(&out_path, body)?;
        Ok(())
    }
}

fn copy_static(source: &Path, rel: &str, output_dir: &Path) -> io::Result<()> {
    let out_path = output_dir.join(rel.trim_start_matches('/'));
    tracing::info!("{} -> {}", source.display(), out_path.display());
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, &out_path)?;
    Ok(())
}
