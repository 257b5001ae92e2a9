//! AST module for pysqf
//!
//! This module provides the closed set of syntax node types the translator
//! understands, with source location tracking. Trees are produced by
//! [`crate::syntax::parser`] and are never mutated by the code generator.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a byte span in the source code.
///
/// # Examples
///
/// ```rust
/// use pysqf::ast::Span;
/// let span = Span { start: 0, end: 5 };
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A whole source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Expr {
        value: Expr,
        span: Span,
    },
    Pass {
        span: Span,
    },
    /// Plain, chained (`a = b = v`) and annotated (`a: T = v`) assignment.
    /// `value` is `None` for a bare annotation.
    Assign {
        targets: Vec<Expr>,
        value: Option<Expr>,
        annotation: Option<Expr>,
        span: Span,
    },
    AugAssign {
        target: Expr,
        op: BinaryOp,
        value: Expr,
        span: Span,
    },
    Delete {
        targets: Vec<Expr>,
        span: Span,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        span: Span,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        span: Span,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        span: Span,
    },
    Break {
        span: Span,
    },
    Continue {
        span: Span,
    },
    FunctionDef(FunctionDef),
    Return {
        value: Option<Expr>,
        span: Span,
    },
    /// A statement kind outside the translatable set (class, import, try, ...).
    Other {
        kind: String,
        span: Span,
    },
}

/// Function definition, `def` or `async def`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Parameters,
    pub body: Vec<Stmt>,
    pub decorators: Vec<Expr>,
    pub is_async: bool,
    pub span: Span,
}

/// Parameter list split the way the source grammar classifies parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Parameters {
    /// Positional (and positional-or-keyword) parameter names in order.
    pub args: Vec<Param>,
    /// Default values for the trailing positional parameters.
    pub defaults: Vec<Expr>,
    pub kwonly: Vec<Param>,
    pub vararg: Option<Param>,
    pub kwarg: Option<Param>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub span: Span,
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Constant {
        value: Constant,
        span: Span,
    },
    /// Interpolated string (`f"..."`).
    JoinedStr {
        parts: Vec<FStringPart>,
        span: Span,
    },
    List {
        elts: Vec<Expr>,
        span: Span,
    },
    Tuple {
        elts: Vec<Expr>,
        span: Span,
    },
    Dict {
        span: Span,
    },
    Name {
        id: String,
        span: Span,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
        span: Span,
    },
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
        span: Span,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
        span: Span,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
        span: Span,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
        span: Span,
    },
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
        span: Span,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
        span: Span,
    },
    Starred {
        value: Box<Expr>,
        span: Span,
    },
    /// An expression kind outside the translatable set (lambda, comprehension, ...).
    Other {
        kind: String,
        span: Span,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constant {
    None,
    Ellipsis,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Imaginary literal, kept as written.
    Complex(String),
}

/// One segment of an interpolated string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FStringPart {
    Literal(String),
    Formatted {
        value: Box<Expr>,
        /// `!r`, `!s` or `!a`.
        conversion: Option<char>,
        format_spec: Option<String>,
        span: Span,
    },
}

/// Keyword argument in a call; `arg` is `None` for `**mapping`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
    Invert,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMult,
    BitOr,
    BitAnd,
    BitXor,
    LShift,
    RShift,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    In,
    NotIn,
    Is,
    IsNot,
}

/// Borrowed view over any syntax node, the input of the dispatcher.
#[derive(Debug, Copy, Clone)]
pub enum Node<'a> {
    Module(&'a Module),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Stmt {
    /// Short construct name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Stmt::Expr { .. } => "expression statement",
            Stmt::Pass { .. } => "pass",
            Stmt::Assign { .. } => "assign",
            Stmt::AugAssign { .. } => "augmented assign",
            Stmt::Delete { .. } => "delete",
            Stmt::If { .. } => "if",
            Stmt::While { .. } => "while",
            Stmt::For { .. } => "for",
            Stmt::Break { .. } => "break",
            Stmt::Continue { .. } => "continue",
            Stmt::FunctionDef(_) => "function",
            Stmt::Return { .. } => "return",
            Stmt::Other { kind, .. } => kind,
        }
    }
}

impl Expr {
    /// Returns the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Constant { span, .. }
            | Expr::JoinedStr { span, .. }
            | Expr::List { span, .. }
            | Expr::Tuple { span, .. }
            | Expr::Dict { span }
            | Expr::Name { span, .. }
            | Expr::UnaryOp { span, .. }
            | Expr::BinOp { span, .. }
            | Expr::BoolOp { span, .. }
            | Expr::Compare { span, .. }
            | Expr::IfExp { span, .. }
            | Expr::Attribute { span, .. }
            | Expr::Subscript { span, .. }
            | Expr::Slice { span, .. }
            | Expr::Call { span, .. }
            | Expr::Starred { span, .. }
            | Expr::Other { span, .. } => *span,
        }
    }

    /// Short construct name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Expr::Constant { .. } => "constant",
            Expr::JoinedStr { .. } => "format string",
            Expr::List { .. } => "list",
            Expr::Tuple { .. } => "tuple",
            Expr::Dict { .. } => "dict",
            Expr::Name { .. } => "name",
            Expr::UnaryOp { .. } => "unary operation",
            Expr::BinOp { .. } => "binary operation",
            Expr::BoolOp { .. } => "boolean operation",
            Expr::Compare { .. } => "compare",
            Expr::IfExp { .. } => "conditional expression",
            Expr::Attribute { .. } => "attribute",
            Expr::Subscript { .. } => "subscript",
            Expr::Slice { .. } => "slice",
            Expr::Call { .. } => "function call",
            Expr::Starred { .. } => "starred",
            Expr::Other { kind, .. } => kind,
        }
    }

    /// Returns the identifier if this is a plain name reference.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Name { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Returns the value if this is an integer constant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Expr::Constant {
                value: Constant::Int(v),
                ..
            } => Some(*v),
            _ => None,
        }
    }

    pub fn is_binop(&self) -> bool {
        matches!(self, Expr::BinOp { .. })
    }
}

impl<'a> From<&'a Module> for Node<'a> {
    fn from(module: &'a Module) -> Self {
        Node::Module(module)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}

// ============================================================================
// CONSTRUCTION HELPERS
// ============================================================================

/// Terse constructors for building trees by hand, mostly in tests.
pub mod build {
    use super::*;

    pub fn name(id: &str) -> Expr {
        Expr::Name {
            id: id.to_string(),
            span: Span::default(),
        }
    }

    pub fn int(value: i64) -> Expr {
        constant(Constant::Int(value))
    }

    pub fn float(value: f64) -> Expr {
        constant(Constant::Float(value))
    }

    pub fn string(value: &str) -> Expr {
        constant(Constant::Str(value.to_string()))
    }

    pub fn constant(value: Constant) -> Expr {
        Expr::Constant {
            value,
            span: Span::default(),
        }
    }

    pub fn binop(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span: Span::default(),
        }
    }

    pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Expr {
        Expr::Compare {
            left: Box::new(left),
            ops: vec![op],
            comparators: vec![right],
            span: Span::default(),
        }
    }

    pub fn attribute(value: Expr, attr: &str) -> Expr {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.to_string(),
            span: Span::default(),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: vec![],
            span: Span::default(),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assign {
            targets: vec![target],
            value: Some(value),
            annotation: None,
            span: Span::default(),
        }
    }

    pub fn expr_stmt(value: Expr) -> Stmt {
        Stmt::Expr {
            value,
            span: Span::default(),
        }
    }

    pub fn module(body: Vec<Stmt>) -> Module {
        Module {
            body,
            span: Span::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_int_only_matches_integers() {
        assert_eq!(build::int(3).as_int(), Some(3));
        assert_eq!(build::float(3.0).as_int(), None);
        assert_eq!(build::name("i").as_int(), None);
    }
}
