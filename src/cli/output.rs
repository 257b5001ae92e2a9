//! Handles all user-facing output for the CLI.
//!
//! Translated SQF and JSON go to standard output; diagnostics and summaries
//! go to standard error so that output can be piped.

use miette::{NamedSource, Report};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diagnostics::Diagnostics;
use crate::errors::SourceContext;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Renders every recorded diagnostic against its source with miette.
pub fn print_diagnostics(source: &SourceContext, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        let named = NamedSource::new(source.name.clone(), source.content.clone());
        let report = Report::new(diagnostic.clone()).with_source_code(named);
        eprintln!("{report:?}");
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

/// One status line for a checked file.
pub fn print_check_summary(name: &str, skipped: usize) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    if skipped == 0 {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        eprint!("✓ ");
        let _ = stderr.reset();
        eprintln!("{}: fully translatable", name);
        return;
    }
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    eprint!("! ");
    let _ = stderr.reset();
    eprintln!("{}: {} construct(s) would be skipped", name, skipped);
}

/// Totals for a `build` run.
pub fn print_build_summary(translated: usize, partial: usize, failed: usize) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);

    let _ = stderr.set_color(ColorSpec::new().set_bold(true));
    eprintln!("\nBuild Summary");
    let _ = stderr.reset();
    eprintln!("═════════════");

    if translated > 0 {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        eprintln!("✓ Translated: {} files", translated);
    }
    if partial > 0 {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        eprintln!("! Partial:    {} files", partial);
    }
    if failed > 0 {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        eprintln!("✗ Failed:     {} files", failed);
    }
    let _ = stderr.reset();
}

/// Marks one file of a build as failed.
pub fn print_failed_file(name: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    eprint!("✗ ");
    let _ = stderr.reset();
    eprintln!("{}", name);
}
