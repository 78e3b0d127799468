use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the mudz binary.
#[derive(Parser, Debug)]
#[command(
    name = "mudz",
    version,
    about = "Error-tolerant analysis for LPC-style object sources"
)]
pub struct CliArgs {
    /// Path to mudz.json or a directory containing it.
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<PathBuf>,

    /// Additional directory searched for `#include` and `inherit` targets.
    #[arg(short = 'I', long = "include", global = true)]
    pub include: Vec<PathBuf>,

    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of a file.
    Tokens {
        file: PathBuf,

        /// Also print comment tokens.
        #[arg(long)]
        comments: bool,
    },

    /// Print the syntax tree of a file.
    Ast { file: PathBuf },

    /// Print completion suggestions at a cursor.
    Complete {
        file: PathBuf,

        /// Cursor as a byte offset.
        #[arg(long, conflicts_with = "line")]
        offset: Option<u32>,

        /// Cursor line, 1-based.
        #[arg(long, requires = "column")]
        line: Option<u32>,

        /// Cursor column, 1-based.
        #[arg(long, requires = "line")]
        column: Option<u32>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Report syntax problems in files and directories.
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
