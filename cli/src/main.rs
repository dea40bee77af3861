// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI
//!
//! ```text
//! goban --size 19 --format sgf pd dd qp
//! echo "ee cc pass gg" | goban -s 9 --labels
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use goban_cli::{run, Args};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins unless --debug was given
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let moves = if args.moves.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read moves from stdin")?;
        text
    } else {
        args.moves.join(" ")
    };

    let output = run(&args, &moves)?;
    print!("{output}");
    Ok(())
}
