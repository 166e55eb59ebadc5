//! `delta` binary entry point.

use std::io;

use anyhow::Result;
use clap::Parser;
use delta_cli::{cli, commands, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let config = commands::load_config(args.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match args.command {
        cli::Command::Bundle(bundle_args) => commands::bundle_execute(bundle_args, config, &mut stdout),
        cli::Command::Hmr(hmr_args) => commands::hmr_execute(hmr_args, config, &mut stdout),
    }
}
