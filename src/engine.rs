use crate::{
    ast::Module,
    codegen::{layout, Translator},
    diagnostics::Diagnostics,
    errors::{SourceContext, SqfError},
    syntax,
};

// ============================================================================
// TRANSLATION OPTIONS
// ============================================================================

/// How a translation treats unsupported constructs and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Fail on the first unsupported construct instead of skipping it
    pub strict: bool,
    /// Re-indent the output; flat single-line SQF otherwise
    pub format: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            format: true,
        }
    }
}

impl TranslateOptions {
    pub fn new(strict: bool, format: bool) -> Self {
        Self { strict, format }
    }
}

// ============================================================================
// TRANSLATION RESULT
// ============================================================================

/// Output of one translation call.
///
/// A non-empty `diagnostics` list means some source constructs produced no
/// output, so `output` is not a complete rendering of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub output: String,
    pub diagnostics: Diagnostics,
}

impl Translation {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Parse, lower and lay out one source file.
pub fn translate_source(
    source: &SourceContext,
    options: &TranslateOptions,
) -> Result<Translation, SqfError> {
    // Step 1: Parse into the syntax tree
    let module = syntax::parse(source)?;
    log::debug!("{}: parsed {} statements", source.name, module.body.len());

    // Step 2: Lower and format
    translate_module(&module, source, options)
}

/// Lower and lay out a tree the caller already holds. `source` is only used
/// to attach spans to errors.
pub fn translate_module(
    module: &Module,
    source: &SourceContext,
    options: &TranslateOptions,
) -> Result<Translation, SqfError> {
    // Step 1: Lower to flat SQF
    let mut translator = Translator::new(source, options.strict);
    let flat = translator.translate(module)?;
    let diagnostics = translator.finish();

    // Step 2: Re-indent if requested
    let output = if options.format {
        layout::indent(&flat)
    } else {
        flat
    };

    if !diagnostics.is_empty() {
        log::info!(
            "{}: {} construct(s) could not be translated",
            source.name,
            diagnostics.len()
        );
    }

    Ok(Translation {
        output,
        diagnostics,
    })
}
