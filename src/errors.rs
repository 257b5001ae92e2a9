//! pysqf Error Handling - Unified Encapsulated API
//!
//! Fatal failures of any pipeline phase are a single [`SqfError`]. Errors are
//! never built by hand: a [`SourceContext`] implements [`ErrorReporting`] and
//! attaches the source, span, phase and diagnostic code.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;

use crate::ast::Span;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Source text plus the name it is reported under.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a fallback when real source is unavailable, e.g. for trees
    /// built in memory rather than parsed.
    pub fn fallback(context: &str) -> Self {
        Self {
            name: "fallback".to_string(),
            content: format!("# {}", context),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }

    /// Clamps a span to the source so miette never renders out of bounds.
    fn clamp(&self, span: SourceSpan) -> SourceSpan {
        let len = self.content.len();
        let start = span.offset().min(len);
        let end = (span.offset() + span.len()).min(len);
        SourceSpan::from(start..end)
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::fallback("default context")
    }
}

/// The single error type
#[derive(Debug)]
pub struct SqfError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All fatal error kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Parse errors - the front end rejected the source
    Syntax {
        message: String,
    },
    InvalidLiteral {
        literal_type: String,
        value: String,
    },

    // Translation errors - raised only in strict mode
    Unsupported {
        construct: String,
        reason: String,
    },
    UnrecognizedNode {
        kind: String,
    },

    // Internal errors - the tree violated an invariant the parser guarantees
    MalformedNode {
        construct: String,
        detail: String,
    },

    // I/O errors - file system access in the CLI
    Io {
        path: String,
        message: String,
    },
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// Context-aware error creation
pub trait ErrorReporting {
    /// Create an error with context-appropriate enhancements
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SqfError;

    fn syntax_error(&self, message: &str, span: SourceSpan) -> SqfError {
        self.report(
            ErrorKind::Syntax {
                message: message.into(),
            },
            span,
        )
    }

    fn invalid_literal(&self, literal_type: &str, value: &str, span: SourceSpan) -> SqfError {
        self.report(
            ErrorKind::InvalidLiteral {
                literal_type: literal_type.into(),
                value: value.into(),
            },
            span,
        )
    }

    fn unsupported(&self, construct: &str, reason: &str, span: SourceSpan) -> SqfError {
        self.report(
            ErrorKind::Unsupported {
                construct: construct.into(),
                reason: reason.into(),
            },
            span,
        )
    }

    fn unrecognized_node(&self, kind: &str, span: SourceSpan) -> SqfError {
        self.report(ErrorKind::UnrecognizedNode { kind: kind.into() }, span)
    }

    /// Creates an internal error. These indicate that the tree handed to the
    /// translator broke a shape invariant, not that the user wrote bad code.
    fn malformed(&self, construct: &str, detail: &str, span: SourceSpan) -> SqfError {
        let mut error = self.report(
            ErrorKind::MalformedNode {
                construct: construct.into(),
                detail: detail.into(),
            },
            span,
        );
        error.diagnostic_info.help =
            Some("This is an internal translator error. Please report this as a bug.".into());
        error
    }

    fn io_error(&self, path: &str, error: &std::io::Error) -> SqfError {
        self.report(
            ErrorKind::Io {
                path: path.into(),
                message: error.to_string(),
            },
            unspanned(),
        )
    }
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } | Self::InvalidLiteral { .. } => ErrorCategory::Parse,
            Self::Unsupported { .. } | Self::UnrecognizedNode { .. } => ErrorCategory::Translation,
            Self::MalformedNode { .. } => ErrorCategory::Internal,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax",
            Self::InvalidLiteral { .. } => "invalid_literal",
            Self::Unsupported { .. } => "unsupported",
            Self::UnrecognizedNode { .. } => "unrecognized_node",
            Self::MalformedNode { .. } => "malformed_node",
            Self::Io { .. } => "io",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Translation,
    Internal,
    Io,
}

impl std::error::Error for SqfError {}

impl fmt::Display for SqfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Syntax { message } => write!(f, "Parse error: {}", message),
            ErrorKind::InvalidLiteral {
                literal_type,
                value,
            } => write!(f, "Parse error: invalid {} '{}'", literal_type, value),
            ErrorKind::Unsupported { construct, reason } => {
                write!(f, "Unsupported {}: {}", construct, reason)
            }
            ErrorKind::UnrecognizedNode { kind } => write!(f, "Unsupported node: {}", kind),
            ErrorKind::MalformedNode { construct, detail } => {
                write!(f, "Internal error: malformed {}: {}", construct, detail)
            }
            ErrorKind::Io { path, message } => write!(f, "I/O error on '{}': {}", path, message),
        }
    }
}

impl Diagnostic for SqfError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if matches!(self.kind, ErrorKind::Io { .. }) {
            return None;
        }
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl SqfError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::Syntax { .. } => "invalid syntax".into(),
            ErrorKind::InvalidLiteral { .. } => "invalid literal".into(),
            ErrorKind::Unsupported { .. } => "not representable in SQF".into(),
            ErrorKind::UnrecognizedNode { .. } => "unsupported node".into(),
            ErrorKind::MalformedNode { .. } => "malformed node".into(),
            ErrorKind::Io { .. } => "i/o failure".into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SqfError {
        let phase = match kind.category() {
            ErrorCategory::Parse => "parse",
            ErrorCategory::Translation => "translate",
            ErrorCategory::Internal => "internal",
            ErrorCategory::Io => "io",
        };
        let error_code = format!("pysqf::{}::{}", phase, kind.code_suffix());

        SqfError {
            kind,
            source_info: SourceInfo {
                source: self.to_named_source(),
                primary_span: self.clamp(span),
                phase: phase.to_string(),
            },
            diagnostic_info: DiagnosticInfo {
                help: None,
                error_code,
            },
        }
    }
}

/// Creates a placeholder span for errors not tied to a specific source code
/// location, such as I/O errors.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Converts an AST Span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span.start..span.end)
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an SqfError with full miette diagnostics
pub fn print_error(error: SqfError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
