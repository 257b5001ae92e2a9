//! SQF code generation.
//!
//! The [`Translator`] walks a syntax tree top-down and returns flat SQF text:
//! every statement ends with `;`, every block is wrapped in `{`/`}` and no
//! other layout is produced. [`layout::indent`] turns that into readable
//! indented text afterwards.
//!
//! Constructs that SQF cannot express are handled according to
//! [`crate::engine::TranslateOptions::strict`]: either a diagnostic is
//! recorded and nothing is emitted for the node, or the whole translation
//! fails with the first such construct.

pub mod expressions;
pub mod layout;
pub mod operators;
pub mod statements;

use crate::ast::{Node, Span, Stmt};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::{to_source_span, ErrorReporting, SourceContext, SqfError};

// ============================================================================
// TARGET CONVENTIONS
// ============================================================================

/// Prefix SQF requires on local (private) variables.
pub const PRIVATE_MARKER: &str = "_";

/// Receiver name that marks an attribute as an engine command, e.g.
/// `GLOBAL.sleep(1)` becomes `sleep 1`.
pub const GLOBAL_MARKER: &str = "GLOBAL";

/// Source name of the implicit `forEach` element variable (`_x` in SQF).
pub const FOREACH_CURSOR: &str = "x";

/// Source function recognised as a counted loop when iterated over.
pub const RANGE_FUNCTION: &str = "range";

/// Fragment result of lowering a single node.
pub type Lowered = Result<String, SqfError>;

// ============================================================================
// TRANSLATOR
// ============================================================================

/// Translation state for one call. Not shared between calls.
pub struct Translator<'a> {
    source: &'a SourceContext,
    strict: bool,
    diagnostics: Diagnostics,
}

impl<'a> Translator<'a> {
    pub fn new(source: &'a SourceContext, strict: bool) -> Self {
        Self {
            source,
            strict,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Dispatches any node to its lowering rule.
    pub fn translate<'n>(&mut self, node: impl Into<Node<'n>>) -> Lowered {
        match node.into() {
            Node::Module(module) => self.lower_block(&module.body),
            Node::Stmt(stmt) => self.lower_stmt(stmt),
            Node::Expr(expr) => self.lower_expr(expr),
        }
    }

    /// Hands back everything recorded during translation.
    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }

    // ------------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------------

    /// Statements concatenated in source order, no separators.
    pub(crate) fn lower_block(&mut self, body: &[Stmt]) -> Lowered {
        let mut out = String::new();
        for stmt in body {
            out.push_str(&self.lower_stmt(stmt)?);
        }
        Ok(out)
    }

    /// Records an unsupported construct and yields an empty fragment, or
    /// fails outright in strict mode.
    pub(crate) fn unsupported(&mut self, construct: &str, reason: &str, span: Span) -> Lowered {
        if self.strict {
            return Err(self
                .source
                .unsupported(construct, reason, to_source_span(span)));
        }
        self.diagnostics
            .push(Diagnostic::unsupported(construct, reason, span));
        Ok(String::new())
    }

    /// Same policy as [`Self::unsupported`], for node kinds with no rule.
    pub(crate) fn unrecognized(&mut self, kind: &str, span: Span) -> Lowered {
        if self.strict {
            return Err(self.source.unrecognized_node(kind, to_source_span(span)));
        }
        self.diagnostics.push(Diagnostic::unrecognized(kind, span));
        Ok(String::new())
    }

    /// Shape invariant violated: always fatal.
    pub(crate) fn malformed(&self, construct: &str, detail: &str, span: Span) -> SqfError {
        log::error!("malformed {}: {}", construct, detail);
        self.source.malformed(construct, detail, to_source_span(span))
    }
}

/// `_name` for a source identifier.
pub(crate) fn private(name: &str) -> String {
    format!("{}{}", PRIVATE_MARKER, name)
}
