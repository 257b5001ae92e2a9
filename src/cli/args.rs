//! Defines the command-line arguments and subcommands for the pysqf CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pysqf",
    version,
    about = "Translate Python scripts into SQF for the Real Virtuality engine."
)]
pub struct PysqfArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate one Python file to SQF.
    Translate {
        /// The Python file to translate.
        #[arg(required = true)]
        input: PathBuf,
        /// Where to write the SQF; standard output when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail on the first construct that has no SQF equivalent.
        #[arg(long)]
        strict: bool,
        /// Emit single-line SQF without re-indenting it.
        #[arg(long)]
        flat: bool,
    },
    /// Translate every `.py` file under a directory.
    Build {
        /// The directory to scan recursively.
        #[arg(required = true)]
        dir: PathBuf,
        /// Mirror the translated files under this directory instead of
        /// writing them next to their sources.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Fail a file on the first construct that has no SQF equivalent.
        #[arg(long)]
        strict: bool,
    },
    /// Translate without writing and report anything that was skipped.
    Check {
        /// The Python file to check.
        #[arg(required = true)]
        input: PathBuf,
        /// Report the first untranslatable construct as an error.
        #[arg(long)]
        strict: bool,
    },
    /// Show the syntax tree of a Python file as JSON.
    Ast {
        /// The Python file to parse.
        #[arg(required = true)]
        input: PathBuf,
    },
}
