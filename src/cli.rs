// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// doc-mirror is a single-purpose tool, so there are no subcommands:
// just two positional arguments and a couple of flags.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "doc-mirror",
    version = "0.1.0",
    about = "Archive a rendered-markdown document site to local disk",
    long_about = "doc-mirror downloads the markdown source of a page, mirrors every \
                  same-host image it references into an uploads/ folder, and follows \
                  every same-host link until the whole site is archived. Re-running \
                  against the same destination skips everything already on disk."
)]
pub struct Cli {
    /// URL of the page to start archiving from
    ///
    /// Example: https://docs.example.com/getting-started
    pub start_url: String,

    /// Directory the archive is written into (created if missing)
    ///
    /// Pages land here as <name>.md, images under uploads/
    #[arg(default_value = ".")]
    pub destination: PathBuf,

    /// Log level: error, warn, info, debug or trace
    ///
    /// An unknown level is a configuration error and nothing is crawled.
    /// RUST_LOG, if set, overrides this flag.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output the final report in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}
