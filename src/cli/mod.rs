//! The pysqf Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{fs, path::Path, process};

use clap::Parser;
use rayon::prelude::*;

use crate::cli::args::{Command, PysqfArgs};
use crate::{
    discovery::SourceDiscoverer,
    engine::{translate_source, TranslateOptions, Translation},
    errors::{print_error, unspanned, ErrorReporting, SourceContext, SqfError},
    syntax,
};

pub mod args;
pub mod output;

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = PysqfArgs::parse();

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Translate {
            input,
            output: target,
            strict,
            flat,
        } => handle_translate(&input, target.as_deref(), TranslateOptions::new(strict, !flat)),
        Command::Build {
            dir,
            out_dir,
            strict,
        } => handle_build(&dir, out_dir.as_deref(), strict),
        Command::Check { input, strict } => handle_check(&input, strict),
        Command::Ast { input } => handle_ast(&input),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Handles the `translate` subcommand.
fn handle_translate(
    input: &Path,
    target: Option<&Path>,
    options: TranslateOptions,
) -> Result<bool, SqfError> {
    let source = read_source(input)?;
    let translation = translate_source(&source, &options)?;
    output::print_diagnostics(&source, &translation.diagnostics);

    match target {
        Some(path) => {
            write_target(path, &translation.output)?;
            log::info!("{} -> {}", input.display(), path.display());
        }
        None => println!("{}", translation.output),
    }
    log::info!("Success!");
    Ok(true)
}

/// Handles the `build` subcommand. Files are translated in parallel and
/// reported in discovery order.
fn handle_build(dir: &Path, out_dir: Option<&Path>, strict: bool) -> Result<bool, SqfError> {
    let files = SourceDiscoverer::discover_source_files(dir)?;
    if files.is_empty() {
        log::warn!("no .py files found under {}", dir.display());
        return Ok(true);
    }
    log::info!("Found {} source files", files.len());

    let options = TranslateOptions::new(strict, true);
    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| {
            let target = SourceDiscoverer::target_path(path, dir, out_dir);
            (path, build_file(path, &target, &options), target)
        })
        .collect();

    let (mut translated, mut partial, mut failed) = (0, 0, 0);
    for (path, outcome, target) in outcomes {
        match outcome {
            Ok((source, translation)) => {
                output::print_diagnostics(&source, &translation.diagnostics);
                if translation.is_complete() {
                    translated += 1;
                } else {
                    partial += 1;
                }
                log::info!("{} -> {}", path.display(), target.display());
            }
            Err(e) => {
                failed += 1;
                output::print_failed_file(&path.display().to_string());
                print_error(e);
            }
        }
    }

    output::print_build_summary(translated, partial, failed);
    if failed == 0 {
        log::info!("Success!");
    }
    Ok(failed == 0)
}

/// Handles the `check` subcommand.
fn handle_check(input: &Path, strict: bool) -> Result<bool, SqfError> {
    let source = read_source(input)?;
    let translation = translate_source(&source, &TranslateOptions::new(strict, false))?;
    output::print_diagnostics(&source, &translation.diagnostics);
    output::print_check_summary(&source.name, translation.diagnostics.len());
    Ok(translation.is_complete())
}

/// Handles the `ast` subcommand.
fn handle_ast(input: &Path) -> Result<bool, SqfError> {
    let source = read_source(input)?;
    let module = syntax::parse(&source)?;
    let json = serde_json::to_string_pretty(&module)
        .map_err(|e| source.malformed("module", &e.to_string(), unspanned()))?;
    println!("{}", json);
    Ok(true)
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn build_file(
    path: &Path,
    target: &Path,
    options: &TranslateOptions,
) -> Result<(SourceContext, Translation), SqfError> {
    let source = read_source(path)?;
    let translation = translate_source(&source, options)?;
    write_target(target, &translation.output)?;
    Ok((source, translation))
}

fn read_source(path: &Path) -> Result<SourceContext, SqfError> {
    let name = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| SourceContext::fallback("reading source").io_error(&name, &e))?;
    Ok(SourceContext::from_file(name, content))
}

fn write_target(path: &Path, text: &str) -> Result<(), SqfError> {
    let name = path.display().to_string();
    let io_error = |e: std::io::Error| SourceContext::fallback("writing output").io_error(&name, &e);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, text).map_err(io_error)
}
