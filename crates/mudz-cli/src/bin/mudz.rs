#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use mudz_cli::args::CliArgs;
use mudz_cli::driver;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() -> Result<()> {
    // Initialize tracing if MUDZ_LOG or RUST_LOG is set.
    // Supports MUDZ_LOG_FORMAT=tree|json|text.
    mudz::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let color = !args.no_color && std::io::stdout().is_terminal();

    let status = match driver::run(&args, &cwd, color) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.text.as_bytes())
                .context("failed to write output")?;
            if output.has_errors {
                EXIT_DIAGNOSTICS
            } else {
                EXIT_SUCCESS
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(status);
}
