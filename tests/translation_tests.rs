// tests/translation_tests.rs
//
// End-to-end scenarios: Python source in, SQF text out.

use pysqf::ast::build::{assign, expr_stmt, int, module, name};
use pysqf::ast::{CmpOp, Expr, Span, Stmt};
use pysqf::errors::ErrorCategory;
use pysqf::{to_sqf, translate_module, translate_source, SourceContext, TranslateOptions};

fn sqf(source: &str) -> String {
    let translation = to_sqf(source).unwrap();
    assert!(
        translation.is_complete(),
        "unexpected diagnostics: {:?}",
        translation.diagnostics
    );
    translation.output
}

fn flat(source: &str) -> String {
    let context = SourceContext::from_file("flat.py", source);
    translate_source(&context, &TranslateOptions::new(false, false))
        .unwrap()
        .output
}

// ---
// Whole programs
// ---

#[test]
fn test_assignments_and_conditional() {
    let source = "x = 1\ny = 2\nif x < y:\n    z = x + y\nelse:\n    z = x - y\n";
    let expected = "_x = 1;\n_y = 2;\nif (_x < _y) then {\n    _z = _x + _y;\n} else {\n    _z = _x - _y;\n};";
    assert_eq!(sqf(source), expected);
}

#[test]
fn test_counted_loop() {
    let source = "for i in range(10):\n    GLOBAL.hint(i)\n";
    assert_eq!(
        sqf(source),
        "for \"_i\" from 0 to 10 step 1 do {\n    hint _i;\n};"
    );
}

#[test]
fn test_counted_loop_with_start_and_step() {
    assert_eq!(
        flat("for i in range(2, 10, 2):\n    pass\n"),
        "for \"_i\" from 2 to 10 step 2 do {};"
    );
}

#[test]
fn test_function_definition_returns_last_expression() {
    let source = "def add(a, b):\n    return a + b\n";
    assert_eq!(
        sqf(source),
        "add = {\n    params [\"_a\", \"_b\"];\n    _a + _b\n};"
    );
}

#[test]
fn test_for_each_loop() {
    let source = "for unit in units:\n    GLOBAL.deleteVehicle(unit)\n";
    assert_eq!(
        sqf(source),
        "{\n    private _unit = _x;\n    deleteVehicle _unit;\n} forEach _units;"
    );
}

#[test]
fn test_for_each_with_cursor_name() {
    assert_eq!(
        flat("for x in units:\n    GLOBAL.hint(x)\n"),
        "{;hint _x;} forEach _units;"
    );
}

#[test]
fn test_while_loop() {
    let source = "while alive:\n    GLOBAL.sleep(1)\n";
    assert_eq!(sqf(source), "while {\n    _alive\n} do {\n    sleep 1;\n};");
}

#[test]
fn test_elif_nests_in_else_branch() {
    let source = "if a:\n    b = 1\nelif c:\n    b = 2\n";
    assert_eq!(
        flat(source),
        "if (_a) then {_b = 1;} else {if (_c) then {_b = 2;};};"
    );
}

// ---
// Expressions
// ---

#[test]
fn test_nested_arithmetic_keeps_grouping() {
    assert_eq!(
        flat("r = (a + b) * (c - d) / e\n"),
        "_r = ((_a + _b) * (_c - _d)) / _e;"
    );
}

#[test]
fn test_floor_division_is_plain_division() {
    assert_eq!(flat("r = a // 2\n"), "_r = _a / 2;");
}

#[test]
fn test_boolean_logic() {
    assert_eq!(
        flat("if a and not b or c:\n    pass\n"),
        "if (_a && !_b || _c) then {};"
    );
}

#[test]
fn test_slice_becomes_offset_and_length() {
    assert_eq!(flat("s = seq[2:5]\n"), "_s = _seq select [2, 3];");
    assert_eq!(flat("s = seq[1]\n"), "_s = _seq select 1;");
}

#[test]
fn test_engine_commands_and_methods() {
    assert_eq!(flat("p = GLOBAL.player\n"), "_p = player;");
    assert_eq!(flat("unit.setDamage(1)\n"), "_unit setDamage 1;");
    assert_eq!(
        flat("GLOBAL.setPos(unit, pos)\n"),
        "setPos [_unit, _pos];"
    );
    assert_eq!(flat("spawn_wave(3, 2.5)\n"), "[3, 2.5] call spawn_wave;");
}

#[test]
fn test_format_string() {
    assert_eq!(
        flat("GLOBAL.hint(f\"Hello {name}, {n} left\")\n"),
        "hint format [\"Hello %1, %2 left\", _name, _n];"
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        flat("v = [None, True, False, 'txt', 1.5]\n"),
        "_v = [nil, true, false, \"txt\", 1.5];"
    );
}

#[test]
fn test_conditional_expression_keeps_inner_terminator() {
    assert_eq!(flat("a = 1 if c else 2\n"), "_a = if (_c) then {1} else {2};;");
}

// ---
// Assignment forms
// ---

#[test]
fn test_chained_assignment() {
    assert_eq!(flat("a = b = 0\n"), "_a = 0;_b = 0;");
}

#[test]
fn test_subscript_assignment() {
    assert_eq!(flat("arr[0] = 5\n"), "_arr set [0, 5];");
}

#[test]
fn test_augmented_assignment_and_delete() {
    assert_eq!(flat("n += 1\nn *= 2\ndel n\n"), "_n = _n + 1;_n = _n * 2;_n = nil;");
}

#[test]
fn test_annotated_assignment() {
    assert_eq!(flat("hp: float = 1.0\n"), "_hp = 1.0;");
}

// ---
// Degraded and strict translation
// ---

#[test]
fn test_unsupported_node_is_skipped_and_reported() {
    let translation = to_sqf("a = 1\nimport os\nc = 2\n").unwrap();
    assert_eq!(translation.output, "_a = 1;\n_c = 2;");
    assert_eq!(translation.diagnostics.len(), 1);
}

#[test]
fn test_chained_comparison_is_reported() {
    let translation = to_sqf("if 0 < x < 10:\n    pass\n").unwrap();
    assert_eq!(translation.diagnostics.len(), 1);
    let diagnostic = translation.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.construct, "compare");
}

#[test]
fn test_each_unsupported_construct_is_reported_once() {
    let source = "d = {}\nf(key=1)\nwhile a:\n    pass\nelse:\n    pass\n";
    let translation = to_sqf(source).unwrap();
    assert_eq!(translation.diagnostics.len(), 3);
}

#[test]
fn test_strict_mode_rejects_unsupported_construct() {
    let context = SourceContext::from_file("strict.py", "a = 1\nx = -1\n");
    let err = translate_source(&context, &TranslateOptions::new(true, true)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Translation);
}

#[test]
fn test_syntax_error_is_fatal() {
    let err = to_sqf("def broken(:\n    pass\n").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn test_empty_source() {
    assert_eq!(sqf(""), "");
}

#[test]
fn test_unsupported_constructs_point_at_the_offending_part() {
    let cases = [
        ("print(*a)\n", "function call", "*a"),
        ("f(a)(b)\n", "function call", "f(a)(b)"),
        ("del a.b\n", "delete", "a.b"),
        ("for a, b in pairs:\n    pass\n", "for", "a, b"),
    ];
    for (source, construct, snippet) in cases {
        let translation = to_sqf(source).unwrap();
        assert_eq!(translation.diagnostics.len(), 1, "for {source:?}");
        let diagnostic = translation.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.construct, construct, "for {source:?}");
        assert_eq!(
            &source[diagnostic.span.start..diagnostic.span.end],
            snippet,
            "for {source:?}"
        );
    }
}

// ---
// Malformed trees
// ---

fn assert_malformed(tree: &pysqf::ast::Module) {
    let context = SourceContext::fallback("hand-built tree");
    for strict in [false, true] {
        let err = translate_module(tree, &context, &TranslateOptions::new(strict, true))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal, "strict = {strict}");
        assert_eq!(err.diagnostic_info.error_code, "pysqf::internal::malformed_node");
    }
}

#[test]
fn test_assignment_without_target_is_fatal() {
    let tree = module(vec![
        assign(name("a"), int(1)),
        Stmt::Assign {
            targets: vec![],
            value: Some(int(2)),
            annotation: None,
            span: Span::default(),
        },
    ]);
    assert_malformed(&tree);
}

#[test]
fn test_compare_with_mismatched_operands_is_fatal() {
    let broken = Expr::Compare {
        left: Box::new(name("a")),
        ops: vec![CmpOp::Lt, CmpOp::Gt],
        comparators: vec![int(1)],
        span: Span::default(),
    };
    assert_malformed(&module(vec![expr_stmt(broken)]));
}

#[test]
fn test_slice_outside_subscript_is_fatal() {
    let stray = Expr::Slice {
        lower: Some(Box::new(int(0))),
        upper: Some(Box::new(int(1))),
        step: None,
        span: Span::default(),
    };
    assert_malformed(&module(vec![expr_stmt(stray)]));
}
