//! Command-line interface definition.
//!
//! - `delta bundle` serializes a graph snapshot into an executable bundle
//! - `delta hmr` serializes a graph delta into a hot-update payload

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Serialize module graph snapshots into bundles and hot updates
#[derive(Parser, Debug)]
#[command(name = "delta", version, about = "Serialize module graphs into bundles and hot updates")]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Serializer config file (.json or .toml)
    ///
    /// Values from `DELTA_*` environment variables override the file, and
    /// command-line flags override both.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a full bundle from a graph snapshot
    Bundle(BundleArgs),

    /// Build a hot-update payload from a graph delta
    Hmr(HmrArgs),
}

#[derive(Args, Debug)]
pub struct BundleArgs {
    /// Graph snapshot JSON (`{"entryPoints": [...], "dependencies": [...]}`)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Entry point path; defaults to the graph's first entry point
    #[arg(short, long)]
    pub entry: Option<String>,

    /// JSON file with an array of modules to prepend (prelude, polyfills).
    /// May be repeated; files are concatenated in order.
    #[arg(long = "pre", value_name = "FILE")]
    pub pre: Vec<PathBuf>,

    /// Omit pre modules
    #[arg(long)]
    pub modules_only: bool,

    /// Production wrapping (no verbose module names)
    #[arg(long)]
    pub no_dev: bool,

    /// Paths to run before the entry point
    #[arg(long = "run-before", value_name = "PATH")]
    pub run_before_main_module: Vec<String>,

    #[arg(long, value_name = "URL")]
    pub source_map_url: Option<String>,

    #[arg(long, value_name = "URL")]
    pub source_url: Option<String>,

    /// Embed the source map as a base64 data URL
    #[arg(long)]
    pub inline_source_map: bool,

    /// Print the bundle record as JSON instead of executable code
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HmrArgs {
    /// Graph snapshot JSON after the change
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Delta JSON (`{"added": [...], "modified": [...], "deleted": [...]}`)
    #[arg(short, long, value_name = "FILE")]
    pub delta: PathBuf,

    /// Entry-point URL of the connected client
    #[arg(long, value_name = "URL")]
    pub client_url: Option<String>,
}
