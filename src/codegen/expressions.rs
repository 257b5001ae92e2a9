//! Expression lowering.
//!
//! Every rule returns a single SQF expression string. Evaluation order of
//! nested arithmetic is preserved by parenthesising any operand that is
//! itself a binary operation; no other precedence is assumed.

use super::{operators, private, Lowered, Translator, GLOBAL_MARKER};
use crate::ast::{Constant, Expr, FStringPart, Keyword, Span};

impl Translator<'_> {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Lowered {
        match expr {
            Expr::Constant { value, span } => self.lower_constant(value, *span),
            Expr::JoinedStr { parts, span } => self.lower_joined_str(parts, *span),
            Expr::List { elts, .. } | Expr::Tuple { elts, .. } => {
                Ok(format!("[{}]", self.lower_list(elts)?))
            }
            Expr::Dict { span } => self.unsupported("dict", "dict is not supported", *span),
            Expr::Name { id, .. } => Ok(private(id)),
            Expr::UnaryOp { op, operand, span } => match operators::unary(*op) {
                Some(token) => Ok(format!("{}{}", token, self.lower_expr(operand)?)),
                None => self.unsupported(
                    "unary operation",
                    &format!("{:?} is not supported", op),
                    *span,
                ),
            },
            Expr::BinOp {
                left,
                op,
                right,
                span,
            } => {
                let Some(token) = operators::binary(*op) else {
                    let reason = format!(
                        "operator `{}` is not supported",
                        operators::source_spelling(*op)
                    );
                    return self.unsupported("binary operation", &reason, *span);
                };
                let left = self.lower_operand(left)?;
                let right = self.lower_operand(right)?;
                Ok(format!("{} {} {}", left, token, right))
            }
            Expr::BoolOp { op, values, .. } => {
                let values = values
                    .iter()
                    .map(|value| self.lower_expr(value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(values.join(operators::boolean(*op)))
            }
            Expr::Compare {
                left,
                ops,
                comparators,
                span,
            } => self.lower_compare(left, ops, comparators, *span),
            Expr::IfExp {
                test,
                body,
                orelse,
                ..
            } => {
                let condition = self.lower_expr(test)?;
                let then_branch = self.lower_expr(body)?;
                let else_branch = self.lower_expr(orelse)?;
                Ok(format!(
                    "if ({}) then {{{}}} else {{{}}};",
                    condition, then_branch, else_branch
                ))
            }
            Expr::Attribute { value, attr, .. } => {
                if value.as_name() == Some(GLOBAL_MARKER) {
                    return Ok(attr.clone());
                }
                Ok(format!("{} {}", self.lower_expr(value)?, attr))
            }
            Expr::Subscript { value, slice, span } => self.lower_subscript(value, slice, *span),
            Expr::Slice { span, .. } => {
                Err(self.malformed("slice", "slice outside of a subscript", *span))
            }
            Expr::Call {
                func,
                args,
                keywords,
                span,
            } => self.lower_call(func, args, keywords, *span),
            Expr::Starred { span, .. } => {
                self.unsupported("starred", "unpacking operator is not supported", *span)
            }
            Expr::Other { kind, span } => self.unrecognized(kind, *span),
        }
    }

    fn lower_constant(&mut self, value: &Constant, span: Span) -> Lowered {
        match value {
            Constant::None => Ok("nil".to_string()),
            Constant::Ellipsis => Ok(String::new()),
            Constant::Str(text) => Ok(format!("\"{}\"", text)),
            Constant::Bool(true) => Ok("true".to_string()),
            Constant::Bool(false) => Ok("false".to_string()),
            Constant::Int(v) => Ok(v.to_string()),
            Constant::Float(v) => Ok(render_float(*v)),
            Constant::Bytes(_) => {
                self.unsupported("constant", "bytes literal is not supported", span)
            }
            Constant::Complex(text) => {
                self.unsupported("constant", &format!("{} is not supported", text), span)
            }
        }
    }

    /// `f"a{x}b{y}"` becomes `format ["a%1b%2", _x, _y]`.
    fn lower_joined_str(&mut self, parts: &[FStringPart], span: Span) -> Lowered {
        let mut template = String::new();
        let mut values = Vec::new();
        for part in parts {
            match part {
                FStringPart::Literal(text) => template.push_str(text),
                FStringPart::Formatted {
                    value,
                    conversion,
                    format_spec,
                    ..
                } => {
                    if conversion.is_some() || format_spec.is_some() {
                        return self.unsupported(
                            "format string",
                            "value format is not supported",
                            span,
                        );
                    }
                    values.push(self.lower_expr(value)?);
                    template.push_str(&format!("%{}", values.len()));
                }
            }
        }
        if values.is_empty() {
            return Ok(format!("\"{}\"", template));
        }
        Ok(format!("format [\"{}\", {}]", template, values.join(", ")))
    }

    pub(crate) fn lower_list(&mut self, elts: &[Expr]) -> Lowered {
        let items = elts
            .iter()
            .map(|elt| self.lower_expr(elt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items.join(", "))
    }

    fn lower_operand(&mut self, operand: &Expr) -> Lowered {
        let text = self.lower_expr(operand)?;
        if operand.is_binop() {
            return Ok(format!("({})", text));
        }
        Ok(text)
    }

    fn lower_compare(
        &mut self,
        left: &Expr,
        ops: &[crate::ast::CmpOp],
        comparators: &[Expr],
        span: Span,
    ) -> Lowered {
        if ops.is_empty() || ops.len() != comparators.len() {
            return Err(self.malformed(
                "compare",
                "operator and operand counts disagree",
                span,
            ));
        }
        if comparators.len() != 1 {
            return self.unsupported("compare", "multiple compare is not supported", span);
        }
        let Some(token) = operators::compare(ops[0]) else {
            return self.unsupported(
                "compare",
                &format!("{:?} comparison is not supported", ops[0]),
                span,
            );
        };
        let left = self.lower_expr(left)?;
        let right = self.lower_expr(&comparators[0])?;
        Ok(format!("{} {} {}", left, token, right))
    }

    fn lower_subscript(&mut self, value: &Expr, slice: &Expr, span: Span) -> Lowered {
        if let Some(index) = slice.as_int() {
            return Ok(format!("{} select {}", self.lower_expr(value)?, index));
        }

        let Expr::Slice {
            lower, upper, step, ..
        } = slice
        else {
            return self.unsupported(
                "subscript",
                "only integer constant indexes and bounded slices are supported",
                span,
            );
        };

        if step.is_some() {
            return self.unsupported("subscript", "slice with step is not supported", span);
        }
        let (Some(lower), Some(upper)) = (lower, upper) else {
            return self.unsupported(
                "subscript",
                "slice without lower or upper is not supported",
                span,
            );
        };
        let (Some(start), Some(end)) = (lower.as_int(), upper.as_int()) else {
            return self.unsupported(
                "subscript",
                "slice bounds must be integer constants",
                span,
            );
        };
        let Some(count) = end.checked_sub(start) else {
            return self.unsupported("subscript", "slice bounds are out of range", span);
        };
        Ok(format!(
            "{} select [{}, {}]",
            self.lower_expr(value)?,
            start,
            count
        ))
    }

    fn lower_call(
        &mut self,
        func: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
        span: Span,
    ) -> Lowered {
        if !keywords.is_empty() {
            return self.unsupported(
                "function call",
                "keyword argument is not supported",
                span,
            );
        }
        if let Some(starred) = args.iter().find(|arg| matches!(arg, Expr::Starred { .. })) {
            return self.unsupported(
                "function call",
                "unpacking operator is not supported",
                starred.span(),
            );
        }

        match func {
            Expr::Name { id, .. } => {
                if let [arg] = args {
                    return Ok(format!("{} call {}", self.lower_expr(arg)?, id));
                }
                Ok(format!("[{}] call {}", self.lower_list(args)?, id))
            }
            Expr::Attribute { .. } => {
                let callee = self.lower_expr(func)?;
                if let [arg] = args {
                    return Ok(format!("{} {}", callee, self.lower_expr(arg)?));
                }
                Ok(format!("{} [{}]", callee, self.lower_list(args)?))
            }
            other => self.unsupported(
                "function call",
                &format!("calling a {} is not supported", other.kind_name()),
                span,
            ),
        }
    }
}

/// Shortest round-trip rendering, always with a fractional part or exponent.
/// Exponents carry a sign and at least two digits (`1e-05`, `1.5e+16`).
fn render_float(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}
