use jsard_core::{
    ArrayCandidate, ArraySelector, DeobfuscateOptions, Deobfuscator, JsardError, RewriteIssue,
    deobfuscate,
};
use jsard_common::limits::MAX_REWRITE_ARENA_NODES;
use jsard_parser::NodeKind;

#[track_caller]
fn assert_deobfuscates(obfuscated: &str, expected: &str) {
    match deobfuscate(obfuscated) {
        Ok(code) => assert_eq!(code, expected, "deobfuscating {obfuscated:?}"),
        Err(err) => panic!("deobfuscating {obfuscated:?} failed: {err}"),
    }
}

// =============================================================================
// One test per parent shape
// =============================================================================

#[test]
fn test_expression_statement() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\n\"foo\";",
    );
}

#[test]
fn test_var_declaration() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];var a=_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\nvar a = \"foo\";",
    );
}

#[test]
fn test_assignment() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];var a;a=_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\nvar a;\na = \"foo\";",
    );
}

#[test]
fn test_array_element() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];var a=[9,_0x01ff[0],7];"#,
        "var _0x01ff = [\"foo\"];\nvar a = [9,\"foo\",7];",
    );
}

#[test]
fn test_nested_array_access() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo", 0, 1];var a=_0x01ff[_0x01ff[_0x01ff[2]]];"#,
        "var _0x01ff = [\"foo\",0,1];\nvar a = \"foo\";",
    );
}

#[test]
fn test_conditional_branches() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];_0x01ff[0]?true:false;"#,
        "var _0x01ff = [\"foo\"];\n\"foo\" ? true : false;",
    );
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];true?_0x01ff[0]:false;"#,
        "var _0x01ff = [\"foo\"];\ntrue ? \"foo\" : false;",
    );
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];true?true:_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\ntrue ? true : \"foo\";",
    );
}

#[test]
fn test_return() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];function f(){return _0x01ff[0]}"#,
        "var _0x01ff = [\"foo\"];\nfunction f() {\n  return \"foo\";\n}",
    );
}

#[test]
fn test_binary_operands() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];_0x01ff[0]+_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\n\"foo\" + \"foo\";",
    );
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];_0x01ff[0]+_0x01ff[0]+_0x01ff[0]+_0x01ff[0];"#,
        "var _0x01ff = [\"foo\"];\n\"foo\" + \"foo\" + \"foo\" + \"foo\";",
    );
}

#[test]
fn test_switch_discriminant() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];switch(_0x01ff[0]){case 1:1;break;default:3;break;}"#,
        "var _0x01ff = [\"foo\"];\nswitch (\"foo\") {\n  case 1:\n    1;\n    break;\n  default:\n    3;\n    break;\n}",
    );
}

#[test]
fn test_case_label() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];switch(0){case _0x01ff[0]:1;break;default:3;break;}"#,
        "var _0x01ff = [\"foo\"];\nswitch (0) {\n  case \"foo\":\n    1;\n    break;\n  default:\n    3;\n    break;\n}",
    );
}

#[test]
fn test_call_argument() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];function f(a){return a}f(_0x01ff[0]);"#,
        "var _0x01ff = [\"foo\"];\nfunction f(a) {\n  return a;\n}\nf(\"foo\");",
    );
}

#[test]
fn test_new_arguments() {
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];new C(_0x01ff[0]);"#,
        "var _0x01ff = [\"foo\"];\nnew C(\"foo\");",
    );
    assert_deobfuscates(
        r#"var _0x01ff=["foo"];new C(9,8,_0x01ff[0]);"#,
        "var _0x01ff = [\"foo\"];\nnew C(9, 8, \"foo\");",
    );
}

#[test]
fn test_string_contents_that_look_like_references() {
    assert_deobfuscates(
        r#"var _0x01ff=[9,"context aware \"_0x01ff[0]\""];var a=_0x01ff[0];a=_0x01ff[1];"#,
        "var _0x01ff = [9,\"context aware \\\"_0x01ff[0]\\\"\"];\nvar a = 9;\na = \"context aware \\\"_0x01ff[0]\\\"\";",
    );
}

#[test]
fn test_supplemented_parent_shapes() {
    assert_deobfuscates(
        "var _a = ['log', 'x', 1]; console[_a[0]](_a[1]);",
        "var _a = ['log','x',1];\nconsole['log']('x');",
    );
    assert_deobfuscates(
        "var _a = ['k', 2]; if (_a[1]) { throw _a[0]; } while (!_a[1]) {}",
        "var _a = ['k',2];\nif (2) {\n  throw 'k';\n}\nwhile (!2) {}",
    );
    assert_deobfuscates(
        "var _a = ['p']; var o = {k: _a[0]}; for (var q in _a[0]) {}",
        "var _a = ['p'];\nvar o = {\n  k: 'p'\n};\nfor (var q in 'p') {}",
    );
    assert_deobfuscates(
        "var _a = [0, 10]; for (i = _a[0]; i < _a[1]; i += _a[1]) {}",
        "var _a = [0,10];\nfor (i = 0; i < 10; i += 10) {}",
    );
    assert_deobfuscates(
        "var _a = ['s']; _a[0].length; typeof _a[0]; do {} while (_a[0]);",
        "var _a = ['s'];\n's'.length;\ntypeof 's';\ndo {} while ('s');",
    );
}

#[test]
fn test_substitution_keeps_precedence() {
    assert_deobfuscates("var _a = [1 + 2]; _a[0] * 3;", "var _a = [1 + 2];\n(1 + 2) * 3;");
    assert_deobfuscates(
        "var _a = [function() { return 1; }]; _a[0]();",
        "var _a = [function() {\n  return 1;\n}];\n(function() {\n  return 1;\n})();",
    );
    assert_deobfuscates("var _a = [5]; _a[0].toFixed();", "var _a = [5];\n(5).toFixed();");
    assert_deobfuscates("var _a = [(x, y)]; f(_a[0]);", "var _a = [(x, y)];\nf((x, y));");
}

// =============================================================================
// Fixed point and identity
// =============================================================================

#[test]
fn test_idempotent_on_own_output() {
    let once = deobfuscate(r#"var _a=["x", 0];f(_a[_a[1]]);"#).expect("first run");
    let twice = deobfuscate(&once).expect("second run");
    assert_eq!(once, twice);
}

#[test]
fn test_nested_resolution_counts_passes() {
    let result = Deobfuscator::new(DeobfuscateOptions::default())
        .run(r#"var _0x01ff=["foo", 0, 1];var a=_0x01ff[_0x01ff[_0x01ff[2]]];"#)
        .expect("deobfuscates");
    assert_eq!(result.array_name, "_0x01ff");
    assert_eq!(result.passes, 3);
    assert_eq!(result.replaced, 3);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_copies_are_independent() {
    // The calls precede the declaration, so both sites copy the element
    // while its inner reference is still unresolved. Each copy then
    // carries a reference of its own.
    let result = Deobfuscator::new(DeobfuscateOptions::default())
        .run("f(_a[0], _a[0]); var _a = [[_a[1]], 'v'];")
        .expect("deobfuscates");
    assert_eq!(result.code, "f(['v'], ['v']);\nvar _a = [['v'],'v'];");
    assert_eq!(result.passes, 2);
    assert_eq!(result.replaced, 5);
}

#[test]
fn test_deeply_nested_references() {
    let depth = 40;
    let mut expression = "_a[0]".to_string();
    for _ in 0..depth {
        expression = format!("_a[{expression}]");
    }
    let source = format!("var _a = [0]; x = {expression};");
    let result = Deobfuscator::new(DeobfuscateOptions::default())
        .run(&source)
        .expect("deobfuscates");
    assert_eq!(result.code, "var _a = [0];\nx = 0;");
    assert_eq!(result.passes, depth + 1);
}

#[test]
fn test_program_without_references_is_reprinted() {
    assert_deobfuscates("var _a=['x'];foo();", "var _a = ['x'];\nfoo();");
}

// =============================================================================
// Unsupported occurrences and limits
// =============================================================================

#[test]
fn test_unsupported_parents_are_reported_and_skipped() {
    let result = Deobfuscator::new(DeobfuscateOptions::default())
        .run("var _a = ['x', 'y'];\n_a[0] = 1;\n_a[1]++;\nf(_a[1]);")
        .expect("deobfuscates despite unsupported shapes");
    assert_eq!(
        result.code,
        "var _a = ['x','y'];\n_a[0] = 1;\n_a[1]++;\nf('y');"
    );
    assert_eq!(result.replaced, 1);
    assert_eq!(result.passes, 1);
    let issues: Vec<_> = result.diagnostics.iter().map(|d| d.issue).collect();
    assert_eq!(
        issues,
        vec![
            RewriteIssue::ChildSlotMismatch {
                parent: NodeKind::AssignmentExpression
            },
            RewriteIssue::UnsupportedParentShape {
                parent: NodeKind::PostfixUnaryExpression
            },
        ]
    );
    let diagnostic = result.diagnostics[0].to_diagnostic("input.js");
    assert_eq!(diagnostic.start, 21);
}

#[test]
fn test_non_literal_indices_are_untouched() {
    assert_deobfuscates(
        "var _a = ['x', 'y']; f(_a[i], _a['0'], _a[1.5], _a[2], _a[-1]);",
        "var _a = ['x','y'];\nf(_a[i], _a['0'], _a[1.5], _a[2], _a[-1]);",
    );
    assert_deobfuscates("var _a = ['x', , 'z']; f(_a[1]);", "var _a = ['x',,'z'];\nf(_a[1]);");
}

#[test]
fn test_self_referential_array_does_not_terminate() {
    let err = deobfuscate("var _a = [_a[0]]; _a[0];").expect_err("never converges");
    match err {
        JsardError::NonTerminatingRewrite { passes, .. } => assert_eq!(passes, 256),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pass_cap_is_configurable() {
    let options = DeobfuscateOptions {
        max_passes: 2,
        ..DeobfuscateOptions::default()
    };
    let err = Deobfuscator::new(options)
        .run(r#"var _a=["foo", 0, 1];var a=_a[_a[_a[2]]];"#)
        .expect_err("needs three passes");
    assert!(matches!(
        err,
        JsardError::NonTerminatingRewrite { passes: 2, .. }
    ));
    assert_eq!(err.code(), 3002);
}

#[test]
fn test_arena_budget_stops_a_doubling_element() {
    let options = DeobfuscateOptions {
        max_arena_nodes: 10_000,
        ..DeobfuscateOptions::default()
    };
    let err = Deobfuscator::new(options)
        .run("var _a = [[_a[0], _a[0]]]; _a[0];")
        .expect_err("the element doubles every pass");
    match err {
        JsardError::NonTerminatingRewrite { passes, nodes } => {
            assert!(nodes <= 10_000, "arena grew to {nodes}");
            assert!(passes < 256, "stopped by the pass cap after {passes}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_arena_budget_applies_within_one_pass() {
    let references = vec!["_a[0]"; 3000].join(", ");
    let source = format!("var _a = [[{references}]]; _a[0];");
    let err = Deobfuscator::new(DeobfuscateOptions::default())
        .run(&source)
        .expect_err("first pass alone would copy millions of nodes");
    match err {
        JsardError::NonTerminatingRewrite { passes, nodes } => {
            assert_eq!(passes, 1);
            assert!(nodes <= MAX_REWRITE_ARENA_NODES);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_long_concatenation_element_is_substituted() {
    let terms: Vec<String> = (0..100_000).map(|i| format!("'s{i}'")).collect();
    let chain = terms.join(" + ");
    let source = format!("var _a = [{chain}]; f(_a[0]);");
    let code = deobfuscate(&source).expect("deep left spine is copied without recursion");
    assert_eq!(code, format!("var _a = [{chain}];\nf({chain});"));
}

// =============================================================================
// Input format and array selection
// =============================================================================

#[test]
fn test_missing_array_is_invalid_input() {
    let err = deobfuscate("var x=1;").expect_err("no array");
    assert!(matches!(err, JsardError::InvalidInputFormat(_)));
    assert_eq!(err.code(), 3001);
    assert_eq!(
        err.to_diagnostic("input.js").message_text,
        "No obfuscation array declaration found."
    );
}

#[test]
fn test_decoy_declarations_are_skipped() {
    assert_deobfuscates(
        r#"var x=1;var _y={"z":2};var _a=["t"];_a[0];"#,
        "var x = 1;\nvar _y = {\n  \"z\": 2\n};\nvar _a = [\"t\"];\n\"t\";",
    );
}

#[test]
fn test_parse_errors_propagate() {
    let err = Deobfuscator::new(DeobfuscateOptions::default())
        .run_named("broken.js", "var _a = ['x'; _a[0];")
        .expect_err("syntax error");
    let JsardError::Parse(parse_error) = err else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(parse_error.file, "broken.js");
    assert_eq!(parse_error.line, 1);
}

#[test]
fn test_selector_picks_named_array() {
    let options = DeobfuscateOptions {
        selector: ArraySelector::named("_s"),
        ..DeobfuscateOptions::default()
    };
    let result = Deobfuscator::new(options)
        .run("var decoy = ['no']; var _s = ['yes']; f(decoy[0], _s[0]);")
        .expect("deobfuscates");
    assert_eq!(result.array_name, "_s");
    assert_eq!(
        result.code,
        "var decoy = ['no'];\nvar _s = ['yes'];\nf(decoy[0], 'yes');"
    );
}

#[test]
fn test_custom_predicate_combines_with_selector() {
    fn all_strings(candidate: &ArrayCandidate<'_>) -> bool {
        candidate.literal.elements.iter().all(|idx| {
            candidate.arena.kind(idx) == Some(NodeKind::StringLiteral)
        })
    }
    let options = DeobfuscateOptions {
        selector: ArraySelector {
            name: None,
            min_elements: 2,
        },
        ..DeobfuscateOptions::default()
    };
    let deobfuscator = Deobfuscator::new(options).with_predicate(all_strings);
    let result = deobfuscator
        .run("var n = [1, 2]; var one = ['a']; var s = ['a', 'b']; f(s[1]);")
        .expect("deobfuscates");
    assert_eq!(result.array_name, "s");
    assert!(result.code.ends_with("f('b');"));
}

#[test]
fn test_deobfuscator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    let deobfuscator = Deobfuscator::new(DeobfuscateOptions::default());
    assert_send_sync(&deobfuscator);

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let deobfuscator = &deobfuscator;
                scope.spawn(move || {
                    let source = format!("var _a = [{i}]; f(_a[0]);");
                    deobfuscator.run(&source).expect("deobfuscates").code
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread finished"))
            .collect()
    });
    for (i, output) in outputs.iter().enumerate() {
        assert_eq!(output, &format!("var _a = [{i}];\nf({i});"));
    }
}
