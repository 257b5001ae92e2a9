//! Python front end - tree-sitter concrete tree to [`ast`](crate::ast) nodes.
//!
//! The grammar is permissive: anything it accepts but the translator has no
//! node for becomes `Stmt::Other` / `Expr::Other` carrying the grammar kind,
//! so that the translator can report it. Only broken source (an `ERROR` or
//! `MISSING` node) and undecodable literals are rejected here.

use tree_sitter::{Node, Parser};

use super::literals::{self, StringPrefix};
use crate::ast::{
    BinaryOp, BoolOp, CmpOp, Constant, Expr, FStringPart, FunctionDef, Keyword, Module, Param,
    Parameters, Span, Stmt, UnaryOp,
};
use crate::errors::{to_source_span, unspanned, ErrorReporting, SourceContext, SqfError};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse Python source into a [`Module`].
pub fn parse(source: &SourceContext) -> Result<Module, SqfError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| source.malformed("grammar", &e.to_string(), unspanned()))?;

    let tree = parser
        .parse(&source.content, None)
        .ok_or_else(|| source.malformed("grammar", "parser returned no tree", unspanned()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(source, root));
    }

    let builder = TreeBuilder { source };
    builder.module(root)
}

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

fn syntax_error(source: &SourceContext, root: Node<'_>) -> SqfError {
    let Some(bad) = first_bad_node(root) else {
        return source.syntax_error("invalid syntax", to_source_span(span_of(root)));
    };
    let message = if bad.is_missing() {
        format!("expected `{}`", bad.kind())
    } else {
        let text = source
            .content
            .get(bad.start_byte()..bad.end_byte())
            .unwrap_or_default()
            .trim();
        match text.lines().next() {
            Some(first) if !first.is_empty() => format!("unexpected `{}`", first),
            _ => "invalid syntax".to_string(),
        }
    };
    source.syntax_error(&message, to_source_span(span_of(bad)))
}

/// Depth-first, document order.
fn first_bad_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_bad_node)
}

// ============================================================================
// TREE BUILDER
// ============================================================================

struct TreeBuilder<'s> {
    source: &'s SourceContext,
}

type Built<T> = Result<T, SqfError>;

impl<'s> TreeBuilder<'s> {
    fn module(&self, root: Node<'_>) -> Built<Module> {
        Ok(Module {
            body: self.statements(root)?,
            span: span_of(root),
        })
    }

    fn statements(&self, node: Node<'_>) -> Built<Vec<Stmt>> {
        named_children(node)
            .into_iter()
            .map(|child| self.stmt(child))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn stmt(&self, node: Node<'_>) -> Built<Stmt> {
        let span = span_of(node);
        match node.kind() {
            "expression_statement" => self.expression_statement(node),
            "pass_statement" => Ok(Stmt::Pass { span }),
            "break_statement" => Ok(Stmt::Break { span }),
            "continue_statement" => Ok(Stmt::Continue { span }),
            "return_statement" => {
                let value = match named_children(node).first() {
                    Some(child) => Some(self.expr(*child)?),
                    None => None,
                };
                Ok(Stmt::Return { value, span })
            }
            "delete_statement" => {
                let targets = match named_children(node).first() {
                    Some(list) if list.kind() == "expression_list" => self.exprs(*list)?,
                    Some(single) => vec![self.expr(*single)?],
                    None => vec![],
                };
                Ok(Stmt::Delete { targets, span })
            }
            "if_statement" => {
                let test = self.expr(self.field(node, "condition")?)?;
                let body = self.statements(self.field(node, "consequence")?)?;
                let mut cursor = node.walk();
                let alternatives: Vec<_> = node
                    .children_by_field_name("alternative", &mut cursor)
                    .collect();
                let orelse = self.else_chain(&alternatives)?;
                Ok(Stmt::If {
                    test,
                    body,
                    orelse,
                    span,
                })
            }
            "while_statement" => Ok(Stmt::While {
                test: self.expr(self.field(node, "condition")?)?,
                body: self.statements(self.field(node, "body")?)?,
                orelse: self.optional_else(node)?,
                span,
            }),
            "for_statement" if has_token(node, "async") => Ok(Stmt::Other {
                kind: "async_for_statement".to_string(),
                span,
            }),
            "for_statement" => Ok(Stmt::For {
                target: self.expr(self.field(node, "left")?)?,
                iter: self.expr(self.field(node, "right")?)?,
                body: self.statements(self.field(node, "body")?)?,
                orelse: self.optional_else(node)?,
                span,
            }),
            "function_definition" => Ok(Stmt::FunctionDef(self.function(node, vec![])?)),
            "decorated_definition" => self.decorated(node),
            other => Ok(Stmt::Other {
                kind: other.to_string(),
                span,
            }),
        }
    }

    fn expression_statement(&self, node: Node<'_>) -> Built<Stmt> {
        let span = span_of(node);
        let children = named_children(node);
        match children.as_slice() {
            [] => Err(self.malformed(node, "empty expression statement")),
            [single] if single.kind() == "assignment" => self.assignment(*single),
            [single] if single.kind() == "augmented_assignment" => {
                self.augmented_assignment(*single)
            }
            [single] => Ok(Stmt::Expr {
                value: self.expr(*single)?,
                span,
            }),
            many => {
                let elts = many
                    .iter()
                    .map(|child| self.expr(*child))
                    .collect::<Built<Vec<_>>>()?;
                Ok(Stmt::Expr {
                    value: Expr::Tuple { elts, span },
                    span,
                })
            }
        }
    }

    /// `a = b = v` nests in the grammar; flatten it into one target list.
    fn assignment(&self, node: Node<'_>) -> Built<Stmt> {
        let span = span_of(node);
        let annotation = match node.child_by_field_name("type") {
            Some(ty) => Some(self.expr(ty)?),
            None => None,
        };

        let mut targets = vec![self.expr(self.field(node, "left")?)?];
        let mut current = node;
        let value = loop {
            match current.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => {
                    targets.push(self.expr(self.field(right, "left")?)?);
                    current = right;
                }
                Some(right) => break Some(self.expr(right)?),
                None => break None,
            }
        };

        Ok(Stmt::Assign {
            targets,
            value,
            annotation,
            span,
        })
    }

    fn augmented_assignment(&self, node: Node<'_>) -> Built<Stmt> {
        let operator = self.field(node, "operator")?;
        let spelling = self.text(operator).trim_end_matches('=');
        let op = binary_op(spelling)
            .ok_or_else(|| self.malformed(operator, "unknown augmented operator"))?;
        Ok(Stmt::AugAssign {
            target: self.expr(self.field(node, "left")?)?,
            op,
            value: self.expr(self.field(node, "right")?)?,
            span: span_of(node),
        })
    }

    /// `elif` clauses become a conditional nested in the else branch.
    fn else_chain(&self, alternatives: &[Node<'_>]) -> Built<Vec<Stmt>> {
        let Some((first, rest)) = alternatives.split_first() else {
            return Ok(vec![]);
        };
        match first.kind() {
            "elif_clause" => {
                let end = rest.last().unwrap_or(first).end_byte();
                Ok(vec![Stmt::If {
                    test: self.expr(self.field(*first, "condition")?)?,
                    body: self.statements(self.field(*first, "consequence")?)?,
                    orelse: self.else_chain(rest)?,
                    span: Span::new(first.start_byte(), end),
                }])
            }
            "else_clause" => self.statements(self.field(*first, "body")?),
            _ => Err(self.malformed(*first, "unexpected if alternative")),
        }
    }

    fn optional_else(&self, node: Node<'_>) -> Built<Vec<Stmt>> {
        match node.child_by_field_name("alternative") {
            Some(clause) => self.statements(self.field(clause, "body")?),
            None => Ok(vec![]),
        }
    }

    fn decorated(&self, node: Node<'_>) -> Built<Stmt> {
        let definition = self.field(node, "definition")?;
        if definition.kind() != "function_definition" {
            return Ok(Stmt::Other {
                kind: definition.kind().to_string(),
                span: span_of(node),
            });
        }
        let decorators = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .map(|decorator| match named_children(decorator).first() {
                Some(inner) => self.expr(*inner),
                None => Err(self.malformed(decorator, "empty decorator")),
            })
            .collect::<Built<Vec<_>>>()?;
        let mut def = self.function(definition, decorators)?;
        def.span = span_of(node);
        Ok(Stmt::FunctionDef(def))
    }

    fn function(&self, node: Node<'_>, decorators: Vec<Expr>) -> Built<FunctionDef> {
        Ok(FunctionDef {
            name: self.text(self.field(node, "name")?).to_string(),
            params: self.parameters(self.field(node, "parameters")?)?,
            body: self.statements(self.field(node, "body")?)?,
            decorators,
            is_async: has_token(node, "async"),
            span: span_of(node),
        })
    }

    /// Sorts parameters into positional, keyword-only and variadic slots.
    fn parameters(&self, node: Node<'_>) -> Built<Parameters> {
        let mut params = Parameters::default();
        let mut keyword_only = false;

        for child in named_children(node) {
            match child.kind() {
                "identifier" => self.push_param(&mut params, keyword_only, self.param(child)),
                "typed_parameter" => {
                    let Some(inner) = named_children(child).into_iter().next() else {
                        return Err(self.malformed(child, "typed parameter without a name"));
                    };
                    match inner.kind() {
                        "list_splat_pattern" => {
                            params.vararg = Some(self.splat_param(inner)?);
                            keyword_only = true;
                        }
                        "dictionary_splat_pattern" => {
                            params.kwarg = Some(self.splat_param(inner)?)
                        }
                        _ => self.push_param(&mut params, keyword_only, self.param(inner)),
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    let param = self.param(self.field(child, "name")?);
                    let value = self.expr(self.field(child, "value")?)?;
                    if !keyword_only {
                        params.defaults.push(value);
                    }
                    self.push_param(&mut params, keyword_only, param);
                }
                "list_splat_pattern" => {
                    params.vararg = Some(self.splat_param(child)?);
                    keyword_only = true;
                }
                "dictionary_splat_pattern" => params.kwarg = Some(self.splat_param(child)?),
                "keyword_separator" => keyword_only = true,
                "positional_separator" => {}
                _ => return Err(self.malformed(child, "unexpected parameter")),
            }
        }
        Ok(params)
    }

    fn push_param(&self, params: &mut Parameters, keyword_only: bool, param: Param) {
        if keyword_only {
            params.kwonly.push(param);
        } else {
            params.args.push(param);
        }
    }

    fn param(&self, node: Node<'_>) -> Param {
        Param {
            name: self.text(node).to_string(),
            span: span_of(node),
        }
    }

    fn splat_param(&self, node: Node<'_>) -> Built<Param> {
        match named_children(node).first() {
            Some(name) => Ok(self.param(*name)),
            None => Err(self.malformed(node, "splat parameter without a name")),
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn expr(&self, node: Node<'_>) -> Built<Expr> {
        let span = span_of(node);
        match node.kind() {
            "identifier" | "keyword_identifier" => Ok(Expr::Name {
                id: self.text(node).to_string(),
                span,
            }),
            "integer" => {
                let text = self.text(node);
                literals::integer(text)
                    .map(|value| Expr::Constant { value, span })
                    .ok_or_else(|| {
                        self.source
                            .invalid_literal("integer", text, to_source_span(span))
                    })
            }
            "float" => {
                let text = self.text(node);
                literals::float(text)
                    .map(|value| Expr::Constant { value, span })
                    .ok_or_else(|| {
                        self.source
                            .invalid_literal("float", text, to_source_span(span))
                    })
            }
            "true" => Ok(constant(Constant::Bool(true), span)),
            "false" => Ok(constant(Constant::Bool(false), span)),
            "none" => Ok(constant(Constant::None, span)),
            "ellipsis" => Ok(constant(Constant::Ellipsis, span)),
            "string" => self.strings(&[node], span),
            "concatenated_string" => self.strings(&named_children(node), span),
            "list" | "list_pattern" => Ok(Expr::List {
                elts: self.exprs(node)?,
                span,
            }),
            "tuple" | "tuple_pattern" | "expression_list" | "pattern_list" => Ok(Expr::Tuple {
                elts: self.exprs(node)?,
                span,
            }),
            "dictionary" => Ok(Expr::Dict { span }),
            "parenthesized_expression" => match named_children(node).as_slice() {
                [inner] => self.expr(*inner),
                _ => Err(self.malformed(node, "parentheses around nothing")),
            },
            "binary_operator" => {
                let operator = self.field(node, "operator")?;
                let op = binary_op(operator.kind())
                    .ok_or_else(|| self.malformed(operator, "unknown binary operator"))?;
                Ok(Expr::BinOp {
                    left: Box::new(self.expr(self.field(node, "left")?)?),
                    op,
                    right: Box::new(self.expr(self.field(node, "right")?)?),
                    span,
                })
            }
            "boolean_operator" => {
                let op = self.bool_op(node)?;
                let mut values = Vec::new();
                self.flatten_bool(node, op, &mut values)?;
                Ok(Expr::BoolOp { op, values, span })
            }
            "not_operator" => Ok(Expr::UnaryOp {
                op: UnaryOp::Not,
                operand: Box::new(self.expr(self.field(node, "argument")?)?),
                span,
            }),
            "unary_operator" => {
                let operator = self.field(node, "operator")?;
                let op = match operator.kind() {
                    "-" => UnaryOp::Neg,
                    "+" => UnaryOp::Pos,
                    "~" => UnaryOp::Invert,
                    _ => return Err(self.malformed(operator, "unknown unary operator")),
                };
                Ok(Expr::UnaryOp {
                    op,
                    operand: Box::new(self.expr(self.field(node, "argument")?)?),
                    span,
                })
            }
            "comparison_operator" => self.comparison(node),
            "conditional_expression" => match named_children(node).as_slice() {
                [body, test, orelse] => Ok(Expr::IfExp {
                    test: Box::new(self.expr(*test)?),
                    body: Box::new(self.expr(*body)?),
                    orelse: Box::new(self.expr(*orelse)?),
                    span,
                }),
                _ => Err(self.malformed(node, "conditional expression needs three operands")),
            },
            "attribute" => Ok(Expr::Attribute {
                value: Box::new(self.expr(self.field(node, "object")?)?),
                attr: self.text(self.field(node, "attribute")?).to_string(),
                span,
            }),
            "subscript" => self.subscript(node),
            "slice" => self.slice(node),
            "call" => self.call(node),
            "list_splat" | "list_splat_pattern" => match named_children(node).first() {
                Some(inner) => Ok(Expr::Starred {
                    value: Box::new(self.expr(*inner)?),
                    span,
                }),
                None => Err(self.malformed(node, "splat without an operand")),
            },
            other => Ok(Expr::Other {
                kind: other.to_string(),
                span,
            }),
        }
    }

    fn exprs(&self, node: Node<'_>) -> Built<Vec<Expr>> {
        named_children(node)
            .into_iter()
            .map(|child| self.expr(child))
            .collect()
    }

    fn bool_op(&self, node: Node<'_>) -> Built<BoolOp> {
        let operator = self.field(node, "operator")?;
        match operator.kind() {
            "and" => Ok(BoolOp::And),
            "or" => Ok(BoolOp::Or),
            _ => Err(self.malformed(operator, "unknown boolean operator")),
        }
    }

    /// `a and b and c` is one combination of three values.
    fn flatten_bool(&self, node: Node<'_>, op: BoolOp, values: &mut Vec<Expr>) -> Built<()> {
        for side in ["left", "right"] {
            let operand = self.field(node, side)?;
            if operand.kind() == "boolean_operator" && self.bool_op(operand)? == op {
                self.flatten_bool(operand, op, values)?;
            } else {
                values.push(self.expr(operand)?);
            }
        }
        Ok(())
    }

    /// Operands are the named children, operators the anonymous ones.
    fn comparison(&self, node: Node<'_>) -> Built<Expr> {
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                operands.push(self.expr(child)?);
                continue;
            }
            let op = match child.kind() {
                "==" => CmpOp::Eq,
                "!=" | "<>" => CmpOp::NotEq,
                "<" => CmpOp::Lt,
                "<=" => CmpOp::LtE,
                ">" => CmpOp::Gt,
                ">=" => CmpOp::GtE,
                "in" => CmpOp::In,
                "not in" => CmpOp::NotIn,
                "is" => CmpOp::Is,
                "is not" => CmpOp::IsNot,
                _ => return Err(self.malformed(child, "unknown comparison operator")),
            };
            ops.push(op);
        }

        let mut operands = operands.into_iter();
        let Some(left) = operands.next() else {
            return Err(self.malformed(node, "comparison without operands"));
        };
        Ok(Expr::Compare {
            left: Box::new(left),
            ops,
            comparators: operands.collect(),
            span: span_of(node),
        })
    }

    fn subscript(&self, node: Node<'_>) -> Built<Expr> {
        let span = span_of(node);
        let value = self.expr(self.field(node, "value")?)?;
        let mut cursor = node.walk();
        let indexes: Vec<_> = node
            .children_by_field_name("subscript", &mut cursor)
            .collect();
        let slice = match indexes.as_slice() {
            [] => return Err(self.malformed(node, "subscript without an index")),
            [single] => self.expr(*single)?,
            many => {
                let elts = many
                    .iter()
                    .map(|index| self.expr(*index))
                    .collect::<Built<Vec<_>>>()?;
                let start = many.first().map_or(span.start, |n| n.start_byte());
                let end = many.last().map_or(span.end, |n| n.end_byte());
                Expr::Tuple {
                    elts,
                    span: Span::new(start, end),
                }
            }
        };
        Ok(Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
            span,
        })
    }

    /// Slice parts carry no field names; position is counted in colons.
    fn slice(&self, node: Node<'_>) -> Built<Expr> {
        let mut parts: [Option<Box<Expr>>; 3] = [None, None, None];
        let mut colons = 0usize;
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            if child.kind() == ":" {
                colons += 1;
            } else if child.is_named() && child.kind() != "comment" {
                let Some(slot) = parts.get_mut(colons) else {
                    return Err(self.malformed(node, "too many slice parts"));
                };
                *slot = Some(Box::new(self.expr(child)?));
            }
        }
        let [lower, upper, step] = parts;
        Ok(Expr::Slice {
            lower,
            upper,
            step,
            span: span_of(node),
        })
    }

    fn call(&self, node: Node<'_>) -> Built<Expr> {
        let span = span_of(node);
        let func = Box::new(self.expr(self.field(node, "function")?)?);
        let arguments = self.field(node, "arguments")?;

        if arguments.kind() == "generator_expression" {
            return Ok(Expr::Call {
                func,
                args: vec![self.expr(arguments)?],
                keywords: vec![],
                span,
            });
        }

        let mut args = Vec::new();
        let mut keywords = Vec::new();
        for child in named_children(arguments) {
            let child_span = span_of(child);
            match child.kind() {
                "keyword_argument" => keywords.push(Keyword {
                    arg: Some(self.text(self.field(child, "name")?).to_string()),
                    value: self.expr(self.field(child, "value")?)?,
                    span: child_span,
                }),
                "dictionary_splat" => match named_children(child).first() {
                    Some(inner) => keywords.push(Keyword {
                        arg: None,
                        value: self.expr(*inner)?,
                        span: child_span,
                    }),
                    None => return Err(self.malformed(child, "splat without an operand")),
                },
                _ => args.push(self.expr(child)?),
            }
        }

        Ok(Expr::Call {
            func,
            args,
            keywords,
            span,
        })
    }

    // ------------------------------------------------------------------------
    // Strings
    // ------------------------------------------------------------------------

    /// One or more adjacent string literals folded into a single constant
    /// or interpolated string.
    fn strings(&self, nodes: &[Node<'_>], span: Span) -> Built<Expr> {
        let mut parts = Vec::new();
        let mut any_format = false;
        let mut any_bytes = false;

        for node in nodes {
            let Some(start) = named_children(*node)
                .into_iter()
                .find(|child| child.kind() == "string_start")
            else {
                return Err(self.malformed(*node, "string without an opening quote"));
            };
            let prefix = StringPrefix::parse(self.text(start));
            any_format |= prefix.format;
            any_bytes |= prefix.bytes;
            self.string_parts(*node, prefix, &mut parts)?;
        }

        if any_format {
            return Ok(Expr::JoinedStr {
                parts: merge_literals(parts),
                span,
            });
        }

        let text: String = parts
            .into_iter()
            .filter_map(|part| match part {
                FStringPart::Literal(text) => Some(text),
                FStringPart::Formatted { .. } => None,
            })
            .collect();
        let value = if any_bytes {
            Constant::Bytes(text.into_bytes())
        } else {
            Constant::Str(text)
        };
        Ok(Expr::Constant { value, span })
    }

    fn string_parts(
        &self,
        node: Node<'_>,
        prefix: StringPrefix,
        parts: &mut Vec<FStringPart>,
    ) -> Built<()> {
        for child in named_children(node) {
            match child.kind() {
                "string_content" => {
                    let raw = self.text(child);
                    let decoded = if prefix.raw {
                        raw.to_string()
                    } else {
                        literals::unescape(raw)
                    };
                    let decoded = if prefix.format {
                        literals::unescape_braces(&decoded)
                    } else {
                        decoded
                    };
                    parts.push(FStringPart::Literal(decoded));
                }
                "interpolation" => parts.push(self.interpolation(child)?),
                "string_start" | "string_end" => {}
                _ => return Err(self.malformed(child, "unexpected string part")),
            }
        }
        Ok(())
    }

    fn interpolation(&self, node: Node<'_>) -> Built<FStringPart> {
        let value = self.expr(self.field(node, "expression")?)?;
        let conversion = node
            .child_by_field_name("type_conversion")
            .and_then(|conv| self.text(conv).trim_start_matches('!').chars().next());
        let format_spec = node
            .child_by_field_name("format_specifier")
            .map(|spec| self.text(spec).trim_start_matches(':').to_string());
        Ok(FStringPart::Formatted {
            value: Box::new(value),
            conversion,
            format_spec,
            span: span_of(node),
        })
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn text(&self, node: Node<'_>) -> &'s str {
        self.source
            .content
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Built<Node<'t>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.malformed(node, &format!("missing `{}`", name)))
    }

    fn malformed(&self, node: Node<'_>, detail: &str) -> SqfError {
        self.source
            .malformed(node.kind(), detail, to_source_span(span_of(node)))
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn span_of(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn constant(value: Constant, span: Span) -> Expr {
    Expr::Constant { value, span }
}

/// Named children with comments removed.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// Whether an anonymous keyword token such as `async` is a direct child.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn binary_op(spelling: &str) -> Option<BinaryOp> {
    let op = match spelling {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mult,
        "/" => BinaryOp::Div,
        "//" => BinaryOp::FloorDiv,
        "%" => BinaryOp::Mod,
        "**" => BinaryOp::Pow,
        "@" => BinaryOp::MatMult,
        "|" => BinaryOp::BitOr,
        "&" => BinaryOp::BitAnd,
        "^" => BinaryOp::BitXor,
        "<<" => BinaryOp::LShift,
        ">>" => BinaryOp::RShift,
        _ => return None,
    };
    Some(op)
}

/// Adjacent literal parts are joined, empty ones dropped.
fn merge_literals(parts: Vec<FStringPart>) -> Vec<FStringPart> {
    let mut merged: Vec<FStringPart> = Vec::with_capacity(parts.len());
    for part in parts {
        match (merged.last_mut(), part) {
            (_, FStringPart::Literal(text)) if text.is_empty() => {}
            (Some(FStringPart::Literal(prev)), FStringPart::Literal(text)) => {
                prev.push_str(&text)
            }
            (_, part) => merged.push(part),
        }
    }
    merged
}
