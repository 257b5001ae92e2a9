//! Statement lowering.
//!
//! Statements end with `;` and blocks are wrapped in braces with no
//! whitespace. Function bodies and `return` are the exception: SQF returns
//! the value of the last expression in a code block, so a `return` lowers
//! to the bare expression.

use super::{operators, private, Lowered, Translator, FOREACH_CURSOR, RANGE_FUNCTION};
use crate::ast::{BinaryOp, Expr, FunctionDef, Span, Stmt};
use crate::errors::SqfError;

/// Resolved `range(...)` bounds.
struct RangeBounds {
    start: i64,
    stop: i64,
    step: i64,
}

impl Translator<'_> {
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Lowered {
        match stmt {
            Stmt::Expr { value, .. } => Ok(format!("{};", self.lower_expr(value)?)),
            Stmt::Pass { .. } => Ok(String::new()),
            Stmt::Assign {
                targets,
                value,
                span,
                ..
            } => self.lower_assign(targets, value.as_ref(), *span),
            Stmt::AugAssign {
                target,
                op,
                value,
                span,
            } => self.lower_aug_assign(target, *op, value, *span),
            Stmt::Delete { targets, .. } => self.lower_delete(targets),
            Stmt::If {
                test, body, orelse, ..
            } => {
                let condition = self.lower_expr(test)?;
                let then_branch = self.lower_block(body)?;
                if orelse.is_empty() {
                    return Ok(format!("if ({}) then {{{}}};", condition, then_branch));
                }
                let else_branch = self.lower_block(orelse)?;
                Ok(format!(
                    "if ({}) then {{{}}} else {{{}}};",
                    condition, then_branch, else_branch
                ))
            }
            Stmt::While {
                test,
                body,
                orelse,
                span,
            } => {
                if !orelse.is_empty() {
                    return self.unsupported("while", "else after while is not supported", *span);
                }
                let condition = self.lower_expr(test)?;
                let body = self.lower_block(body)?;
                Ok(format!("while {{{}}} do {{{}}};", condition, body))
            }
            Stmt::For {
                target,
                iter,
                body,
                orelse,
                span,
            } => self.lower_for(target, iter, body, orelse, *span),
            Stmt::Break { .. } => Ok("break;".to_string()),
            Stmt::Continue { .. } => Ok("continue;".to_string()),
            Stmt::FunctionDef(def) => self.lower_function(def),
            Stmt::Return { value, .. } => match value {
                Some(value) => self.lower_expr(value),
                None => Ok(String::new()),
            },
            Stmt::Other { kind, span } => self.unrecognized(kind, *span),
        }
    }

    /// One `<lhs> = <rhs>;` per target, the right-hand side lowered once.
    fn lower_assign(&mut self, targets: &[Expr], value: Option<&Expr>, span: Span) -> Lowered {
        if targets.is_empty() {
            return Err(self.malformed("assign", "assignment without a target", span));
        }
        let Some(value) = value else {
            return self.unsupported(
                "assign",
                "annotation without a value is not supported",
                span,
            );
        };

        let mut lhs = Vec::with_capacity(targets.len());
        for target in targets {
            match target {
                Expr::Name { id, .. } => lhs.push(AssignTarget::Name(private(id))),
                Expr::Subscript {
                    value: receiver,
                    slice,
                    ..
                } => {
                    let Some(index) = slice.as_int() else {
                        return self.unsupported(
                            "assign",
                            "only integer constant subscript targets are supported",
                            span,
                        );
                    };
                    lhs.push(AssignTarget::Element(self.lower_expr(receiver)?, index));
                }
                other => {
                    return self.unsupported(
                        "assign",
                        &format!("{} target is not supported", other.kind_name()),
                        span,
                    )
                }
            }
        }

        let rhs = self.lower_expr(value)?;
        Ok(lhs
            .into_iter()
            .map(|target| match target {
                AssignTarget::Name(name) => format!("{} = {};", name, rhs),
                AssignTarget::Element(receiver, index) => {
                    format!("{} set [{}, {}];", receiver, index, rhs)
                }
            })
            .collect())
    }

    /// `x += v` becomes `_x = _x + v;`.
    fn lower_aug_assign(
        &mut self,
        target: &Expr,
        op: BinaryOp,
        value: &Expr,
        span: Span,
    ) -> Lowered {
        let Some(id) = target.as_name() else {
            return self.unsupported(
                "augmented assign",
                &format!("{} target is not supported", target.kind_name()),
                span,
            );
        };
        let Some(token) = operators::binary(op) else {
            let reason = format!(
                "operator `{}=` is not supported",
                operators::source_spelling(op)
            );
            return self.unsupported("augmented assign", &reason, span);
        };
        let name = private(id);
        Ok(format!("{0} = {0} {1} {2};", name, token, self.lower_expr(value)?))
    }

    fn lower_delete(&mut self, targets: &[Expr]) -> Lowered {
        let mut out = String::new();
        for target in targets {
            let Some(id) = target.as_name() else {
                return self.unsupported(
                    "delete",
                    "deleting a non-name target is not supported",
                    target.span(),
                );
            };
            out.push_str(&format!("{} = nil;", private(id)));
        }
        Ok(out)
    }

    fn lower_for(
        &mut self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        span: Span,
    ) -> Lowered {
        if !orelse.is_empty() {
            return self.unsupported("for", "else after for is not supported", span);
        }

        if let Expr::Call { func, .. } = iter {
            if func.as_name() == Some(RANGE_FUNCTION) {
                return self.lower_counted_for(target, iter, body, span);
            }
        }

        let Some(var) = target.as_name() else {
            return self.unsupported(
                "for",
                &format!("{} loop target is not supported", target.kind_name()),
                target.span(),
            );
        };
        let rebinding = if var == FOREACH_CURSOR {
            String::new()
        } else {
            format!("private {} = {}", private(var), private(FOREACH_CURSOR))
        };
        let body = self.lower_block(body)?;
        let iter = self.lower_expr(iter)?;
        Ok(format!("{{{};{}}} forEach {};", rebinding, body, iter))
    }

    /// `for i in range(a, b, s)` becomes `for "_i" from a to b step s do {...};`.
    fn lower_counted_for(
        &mut self,
        target: &Expr,
        range: &Expr,
        body: &[Stmt],
        span: Span,
    ) -> Lowered {
        let bounds = match self.range_bounds(range, span)? {
            Some(bounds) => bounds,
            None => return Ok(String::new()),
        };
        let Some(var) = target.as_name() else {
            return self.unsupported(
                "for",
                "for-range loop can only have one variable",
                span,
            );
        };
        let body = self.lower_block(body)?;
        Ok(format!(
            "for \"{}\" from {} to {} step {} do {{{}}};",
            private(var),
            bounds.start,
            bounds.stop,
            bounds.step,
            body
        ))
    }

    /// `None` once a diagnostic has been recorded for the call.
    fn range_bounds(
        &mut self,
        range: &Expr,
        span: Span,
    ) -> Result<Option<RangeBounds>, SqfError> {
        let Expr::Call { args, keywords, .. } = range else {
            return Err(self.malformed("for", "range bounds read from a non-call", span));
        };
        if !keywords.is_empty() {
            self.unsupported("for", "range with keyword arguments is not supported", span)?;
            return Ok(None);
        }
        let values: Option<Vec<i64>> = args.iter().map(Expr::as_int).collect();
        let Some(values) = values else {
            self.unsupported("for", "range arguments must be integer constants", span)?;
            return Ok(None);
        };
        let bounds = match values.as_slice() {
            [stop] => RangeBounds {
                start: 0,
                stop: *stop,
                step: 1,
            },
            [start, stop] => RangeBounds {
                start: *start,
                stop: *stop,
                step: 1,
            },
            [start, stop, step] => RangeBounds {
                start: *start,
                stop: *stop,
                step: *step,
            },
            _ => {
                self.unsupported("for", "range takes one to three arguments", span)?;
                return Ok(None);
            }
        };
        Ok(Some(bounds))
    }

    /// `name = {params ["_a", "_b"];body};`
    fn lower_function(&mut self, def: &FunctionDef) -> Lowered {
        let params = &def.params;
        if !params.kwonly.is_empty() || !params.defaults.is_empty() {
            return self.unsupported(
                "function arguments",
                "keyword only and default arguments are not supported",
                def.span,
            );
        }
        if params.vararg.is_some() || params.kwarg.is_some() {
            return self.unsupported(
                "function arguments",
                "variadic arguments are not supported",
                def.span,
            );
        }
        if !def.decorators.is_empty() {
            return self.unsupported(
                "function",
                "function with decorator is not supported",
                def.span,
            );
        }

        let names = params
            .args
            .iter()
            .map(|param| format!("\"{}\"", private(&param.name)))
            .collect::<Vec<_>>()
            .join(", ");
        let body = self.lower_block(&def.body)?;
        Ok(format!("{} = {{params [{}];{}}};", def.name, names, body))
    }
}

enum AssignTarget {
    Name(String),
    Element(String, i64),
}

#[cfg(test)]
mod tests {
    use crate::ast::build::*;
    use crate::ast::{BinaryOp, CmpOp, Expr, FunctionDef, Param, Parameters, Span, Stmt};
    use crate::codegen::Translator;
    use crate::errors::SourceContext;

    fn lower(stmt: &Stmt) -> (String, usize) {
        let src = SourceContext::fallback("statement tests");
        let mut t = Translator::new(&src, false);
        let out = t.translate(stmt).unwrap();
        (out, t.finish().len())
    }

    fn for_loop(target: Expr, iter: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::For {
            target,
            iter,
            body,
            orelse: vec![],
            span: Span::default(),
        }
    }

    fn function(name: &str, args: &[&str], body: Vec<Stmt>) -> Stmt {
        Stmt::FunctionDef(FunctionDef {
            name: name.to_string(),
            params: Parameters {
                args: args
                    .iter()
                    .map(|a| Param {
                        name: a.to_string(),
                        span: Span::default(),
                    })
                    .collect(),
                ..Parameters::default()
            },
            body,
            decorators: vec![],
            is_async: false,
            span: Span::default(),
        })
    }

    fn ret(value: Expr) -> Stmt {
        Stmt::Return {
            value: Some(value),
            span: Span::default(),
        }
    }

    #[test]
    fn test_simple_assignment() {
        assert_eq!(lower(&assign(name("x"), int(1))).0, "_x = 1;");
    }

    #[test]
    fn test_chained_assignment_emits_one_per_target() {
        let stmt = Stmt::Assign {
            targets: vec![name("a"), name("b")],
            value: Some(int(0)),
            annotation: None,
            span: Span::default(),
        };
        assert_eq!(lower(&stmt).0, "_a = 0;_b = 0;");
    }

    #[test]
    fn test_subscript_assignment_uses_set() {
        let target = Expr::Subscript {
            value: Box::new(name("arr")),
            slice: Box::new(int(1)),
            span: Span::default(),
        };
        assert_eq!(lower(&assign(target, int(5))).0, "_arr set [1, 5];");
    }

    #[test]
    fn test_attribute_target_is_unsupported() {
        let stmt = assign(attribute(name("unit"), "hp"), int(5));
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_augmented_assignment_expands() {
        let stmt = Stmt::AugAssign {
            target: name("count"),
            op: BinaryOp::Add,
            value: int(1),
            span: Span::default(),
        };
        assert_eq!(lower(&stmt).0, "_count = _count + 1;");
    }

    #[test]
    fn test_delete_assigns_nil() {
        let stmt = Stmt::Delete {
            targets: vec![name("a"), name("b")],
            span: Span::default(),
        };
        assert_eq!(lower(&stmt).0, "_a = nil;_b = nil;");
    }

    #[test]
    fn test_expression_statement_gets_terminator() {
        let stmt = expr_stmt(call(attribute(name("GLOBAL"), "hint"), vec![string("hi")]));
        assert_eq!(lower(&stmt).0, "hint \"hi\";");
    }

    #[test]
    fn test_if_with_and_without_else() {
        let test = compare(name("x"), CmpOp::Lt, name("y"));
        let bare = Stmt::If {
            test: test.clone(),
            body: vec![assign(name("z"), int(1))],
            orelse: vec![],
            span: Span::default(),
        };
        assert_eq!(lower(&bare).0, "if (_x < _y) then {_z = 1;};");

        let full = Stmt::If {
            test,
            body: vec![assign(name("z"), int(1))],
            orelse: vec![assign(name("z"), int(2))],
            span: Span::default(),
        };
        assert_eq!(
            lower(&full).0,
            "if (_x < _y) then {_z = 1;} else {_z = 2;};"
        );
    }

    #[test]
    fn test_while_loop() {
        let stmt = Stmt::While {
            test: name("running"),
            body: vec![Stmt::Break {
                span: Span::default(),
            }],
            orelse: vec![],
            span: Span::default(),
        };
        assert_eq!(lower(&stmt).0, "while {_running} do {break;};");
    }

    #[test]
    fn test_while_else_is_unsupported() {
        let stmt = Stmt::While {
            test: name("running"),
            body: vec![],
            orelse: vec![Stmt::Pass {
                span: Span::default(),
            }],
            span: Span::default(),
        };
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_counted_loop_defaults() {
        let stmt = for_loop(
            name("i"),
            call(name("range"), vec![int(10)]),
            vec![expr_stmt(call(attribute(name("GLOBAL"), "hint"), vec![name("i")]))],
        );
        assert_eq!(
            lower(&stmt).0,
            "for \"_i\" from 0 to 10 step 1 do {hint _i;};"
        );
    }

    #[test]
    fn test_counted_loop_with_step() {
        let stmt = for_loop(name("i"), call(name("range"), vec![int(2), int(10), int(2)]), vec![]);
        assert_eq!(lower(&stmt).0, "for \"_i\" from 2 to 10 step 2 do {};");
    }

    #[test]
    fn test_counted_loop_rejects_dynamic_bounds() {
        let stmt = for_loop(name("i"), call(name("range"), vec![name("n")]), vec![]);
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_counted_loop_rejects_tuple_target() {
        let target = Expr::Tuple {
            elts: vec![name("i"), name("j")],
            span: Span::default(),
        };
        let stmt = for_loop(target, call(name("range"), vec![int(3)]), vec![]);
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_for_each_rebinds_loop_variable() {
        let stmt = for_loop(
            name("unit"),
            name("units"),
            vec![expr_stmt(call(name("kill"), vec![name("unit")]))],
        );
        assert_eq!(
            lower(&stmt).0,
            "{private _unit = _x;_unit call kill;} forEach _units;"
        );
    }

    #[test]
    fn test_for_each_over_cursor_name_skips_rebinding() {
        let stmt = for_loop(name("x"), name("units"), vec![]);
        assert_eq!(lower(&stmt).0, "{;} forEach _units;");
    }

    #[test]
    fn test_function_definition() {
        let stmt = function(
            "f",
            &["a", "b"],
            vec![ret(binop(name("a"), BinaryOp::Add, name("b")))],
        );
        assert_eq!(lower(&stmt).0, "f = {params [\"_a\", \"_b\"];_a + _b};");
    }

    #[test]
    fn test_function_without_parameters() {
        let stmt = function("tick", &[], vec![]);
        assert_eq!(lower(&stmt).0, "tick = {params [];};");
    }

    #[test]
    fn test_decorated_function_is_unsupported() {
        let mut stmt = function("f", &[], vec![]);
        if let Stmt::FunctionDef(def) = &mut stmt {
            def.decorators.push(name("cached"));
        }
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_default_arguments_are_unsupported() {
        let mut stmt = function("f", &["a"], vec![]);
        if let Stmt::FunctionDef(def) = &mut stmt {
            def.params.defaults.push(int(1));
        }
        assert_eq!(lower(&stmt), (String::new(), 1));
    }

    #[test]
    fn test_bare_return_is_empty() {
        let stmt = Stmt::Return {
            value: None,
            span: Span::default(),
        };
        assert_eq!(lower(&stmt).0, "");
    }
}
