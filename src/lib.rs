//! pysqf: translate Python scripts into SQF.
//!
//! The pipeline is [`syntax::parse`] → [`codegen::Translator`] →
//! [`codegen::layout::indent`], driven by [`engine::translate_source`].

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod diagnostics;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod syntax;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use engine::{translate_module, translate_source, TranslateOptions, Translation};
pub use errors::{SourceContext, SqfError};

/// Translates Python source text with default options.
pub fn to_sqf(source: &str) -> Result<Translation, SqfError> {
    let context = SourceContext::from_file("<input>", source);
    translate_source(&context, &TranslateOptions::default())
}
