//! Recoverable translation diagnostics.
//!
//! When the translator meets a construct SQF cannot express it records a
//! [`Diagnostic`], emits nothing for that node and keeps going. The
//! [`Diagnostics`] collector belongs to exactly one translation call and is
//! handed back to the caller together with the output, so a partial document
//! is never returned without saying so.

use miette::{LabeledSpan, Severity};
use serde::Serialize;
use thiserror::Error;

use crate::ast::Span;

/// What made a node untranslatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A known node whose particular shape has no SQF counterpart.
    UnsupportedConstruct,
    /// A node kind the translator does not handle at all.
    UnrecognizedNode,
}

/// A single recorded diagnostic: construct name, reason and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("Unsupported {construct}: {reason}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub construct: String,
    pub reason: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn unsupported(construct: &str, reason: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::UnsupportedConstruct,
            construct: construct.to_string(),
            reason: reason.into(),
            span,
        }
    }

    pub fn unrecognized(node_kind: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::UnrecognizedNode,
            construct: "node".to_string(),
            reason: format!("{} is not supported", node_kind),
            span,
        }
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.kind {
            DiagnosticKind::UnsupportedConstruct => "pysqf::translate::unsupported",
            DiagnosticKind::UnrecognizedNode => "pysqf::translate::unrecognized_node",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new("nothing was emitted for this node"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new(
            Some(self.construct.clone()),
            self.span.start,
            self.span.len(),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Per-translation diagnostics collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and forwards it to the `log` facade.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
