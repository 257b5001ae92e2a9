// tests/parser_tests.rs

use pysqf::ast::{BinaryOp, Constant, Expr, Module, Stmt};
use pysqf::errors::{ErrorCategory, ErrorKind};
use pysqf::syntax::parse;
use pysqf::SourceContext;

fn parse_ok(text: &str) -> Module {
    parse(&SourceContext::from_file("parser_test.py", text)).unwrap()
}

fn first_value(text: &str) -> Expr {
    match parse_ok(text).body.into_iter().next() {
        Some(Stmt::Assign {
            value: Some(value), ..
        }) => value,
        Some(Stmt::Expr { value, .. }) => value,
        other => panic!("expected a value, got {:?}", other),
    }
}

#[test]
fn test_statements_keep_source_order() {
    let module = parse_ok("a = 1\nb = 2\n\n# note\nc = 3\n");
    assert_eq!(module.body.len(), 3);
    let kinds: Vec<_> = module.body.iter().map(Stmt::kind_name).collect();
    assert!(kinds.iter().all(|k| *k == kinds[0]));
}

#[test]
fn test_spans_point_into_source() {
    let text = "value = 42\n";
    let module = parse_ok(text);
    let Stmt::Assign { value, .. } = &module.body[0] else {
        panic!("expected assignment");
    };
    let span = value.as_ref().unwrap().span();
    assert_eq!(&text[span.start..span.end], "42");
}

#[test]
fn test_parentheses_are_dropped() {
    let Expr::BinOp { left, op, .. } = first_value("r = ((a + b)) * c\n") else {
        panic!("expected binary operation");
    };
    assert_eq!(op, BinaryOp::Mult);
    assert!(left.is_binop());
}

#[test]
fn test_integer_literal_forms() {
    assert_eq!(first_value("n = 0x10\n").as_int(), Some(16));
    assert_eq!(first_value("n = 1_000_000\n").as_int(), Some(1_000_000));
}

#[test]
fn test_integer_overflow_is_a_parse_error() {
    let err = parse(&SourceContext::from_file("big.py", "n = 123456789012345678901234567890\n"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert!(matches!(err.kind, ErrorKind::InvalidLiteral { .. }));
}

#[test]
fn test_byte_string_is_kept_as_bytes() {
    let Expr::Constant { value, .. } = first_value("b = b'raw'\n") else {
        panic!("expected constant");
    };
    assert_eq!(value, Constant::Bytes(b"raw".to_vec()));
}

#[test]
fn test_raw_string_keeps_backslashes() {
    let Expr::Constant { value, .. } = first_value("p = r'C:\\new'\n") else {
        panic!("expected constant");
    };
    assert_eq!(value, Constant::Str("C:\\new".into()));
}

#[test]
fn test_bare_comma_list_is_a_tuple() {
    assert!(matches!(first_value("t = 1, 2\n"), Expr::Tuple { ref elts, .. } if elts.len() == 2));
}

#[test]
fn test_multi_index_subscript_is_a_tuple_index() {
    let Expr::Subscript { slice, .. } = first_value("v = grid[1, 2]\n") else {
        panic!("expected subscript");
    };
    assert!(matches!(*slice, Expr::Tuple { .. }));
}

#[test]
fn test_async_def_is_a_function() {
    let module = parse_ok("async def tick():\n    pass\n");
    let Stmt::FunctionDef(def) = &module.body[0] else {
        panic!("expected function");
    };
    assert!(def.is_async);
}

#[test]
fn test_unhandled_grammar_kinds_are_preserved() {
    let module = parse_ok("class A:\n    pass\nwith f:\n    pass\n");
    let kinds: Vec<_> = module.body.iter().map(Stmt::kind_name).collect();
    assert_eq!(kinds, vec!["class_definition", "with_statement"]);
    assert!(matches!(first_value("f = lambda: 1\n"), Expr::Other { ref kind, .. } if kind == "lambda"));
}

#[test]
fn test_unclosed_bracket_is_a_syntax_error() {
    let err = parse(&SourceContext::from_file("bad.py", "a = [1, 2\n")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert_eq!(err.diagnostic_info.error_code, "pysqf::parse::syntax");
}
