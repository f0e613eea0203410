// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use htex_cli::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "htex")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Minimal hypertext templating server", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Verbose mode: log every request and parse step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the content root over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Root directory to serve content from ("public" by default)
        #[arg(long)]
        root: Option<String>,
        /// Keep HTML comments in the rendered output
        #[arg(long)]
        keep_comments: bool,
    },
    /// Export the content root as a static site
    Gen {
        /// Source directory to scan ("public" by default)
        #[arg(long)]
        root: Option<String>,
        /// Output directory for the export ("output" by default)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; --verbose wins over --log-level.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            root,
            keep_comments,
        } => commands::serve::run(host, port, root, keep_comments).await,
        Commands::Gen { root, output } => commands::gen::run(root, output),
    }
}
