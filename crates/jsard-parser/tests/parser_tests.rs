//! Parser integration tests: tree shapes, ASI, error reporting.

use jsard_common::diagnostic_codes;
use jsard_parser::parser::node::*;
use jsard_parser::{NodeArena, NodeIndex, NodeKind, ParserState, SyntaxTree, parse_program};
use jsard_scanner::SyntaxKind;

fn parse(source: &str) -> SyntaxTree {
    match parse_program("test.js", source) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn statements(tree: &SyntaxTree) -> Vec<NodeIndex> {
    tree.arena.get_children(tree.root)
}

fn first_expression(tree: &SyntaxTree) -> NodeIndex {
    let statement = statements(tree)[0];
    match &tree.arena.get(statement).expect("statement").data {
        NodeData::ExpressionStatement(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

fn kind(arena: &NodeArena, idx: NodeIndex) -> NodeKind {
    arena.kind(idx).expect("node exists")
}

#[test]
fn test_parse_empty_program() {
    let tree = parse("");
    assert_eq!(kind(&tree.arena, tree.root), NodeKind::Program);
    assert!(statements(&tree).is_empty());

    let tree = parse("  // only a comment\n/* and another */");
    assert!(statements(&tree).is_empty());
}

#[test]
fn test_parse_variable_statement() {
    let tree = parse("var a = ['foo', 0], b;");
    let statement = statements(&tree)[0];
    let NodeData::VariableStatement(stmt) = &tree.arena.get(statement).unwrap().data else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.kind, VariableKind::Var);
    assert_eq!(stmt.declarations.len(), 2);

    let first = stmt.declarations.nodes[0];
    let NodeData::VariableDeclaration(decl) = &tree.arena.get(first).unwrap().data else {
        panic!("expected declaration");
    };
    assert_eq!(tree.arena.identifier_text(decl.name), Some("a"));
    assert_eq!(
        kind(&tree.arena, decl.initializer),
        NodeKind::ArrayLiteralExpression
    );

    let second = stmt.declarations.nodes[1];
    let NodeData::VariableDeclaration(decl) = &tree.arena.get(second).unwrap().data else {
        panic!("expected declaration");
    };
    assert!(decl.initializer.is_none());
}

#[test]
fn test_parse_let_and_const() {
    let tree = parse("let a = 1; const b = 2;");
    let kinds: Vec<VariableKind> = statements(&tree)
        .into_iter()
        .map(|idx| match &tree.arena.get(idx).unwrap().data {
            NodeData::VariableStatement(stmt) => stmt.kind,
            _ => panic!("expected variable statement"),
        })
        .collect();
    assert_eq!(kinds, vec![VariableKind::Let, VariableKind::Const]);
}

#[test]
fn test_let_as_identifier() {
    let tree = parse("let = 5;");
    let expr = first_expression(&tree);
    assert_eq!(kind(&tree.arena, expr), NodeKind::AssignmentExpression);
}

#[test]
fn test_array_holes() {
    let tree = parse("x = [1, , 2, ];");
    let expr = first_expression(&tree);
    let NodeData::AssignmentExpression(assign) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected assignment");
    };
    let NodeData::ArrayLiteralExpression(array) = &tree.arena.get(assign.value).unwrap().data
    else {
        panic!("expected array");
    };
    assert_eq!(array.elements.len(), 3);
    assert!(array.elements.nodes[0].is_some());
    assert!(array.elements.nodes[1].is_none());
    assert!(array.elements.nodes[2].is_some());
}

#[test]
fn test_element_access_with_numeric_index() {
    let tree = parse("arr[3];");
    let expr = first_expression(&tree);
    let NodeData::ElementAccessExpression(access) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected element access");
    };
    assert_eq!(tree.arena.identifier_text(access.object), Some("arr"));
    let NodeData::NumericLiteral(num) = &tree.arena.get(access.index).unwrap().data else {
        panic!("expected numeric literal");
    };
    assert_eq!(num.raw, "3");
    assert_eq!(num.as_index(), Some(3));
}

#[test]
fn test_numeric_literal_as_index() {
    let tree = parse("a[0x10]; a[1.5]; a[1e3];");
    let indices: Vec<Option<usize>> = statements(&tree)
        .into_iter()
        .map(|stmt| {
            let expr = tree.arena.get_children(stmt)[0];
            let index = tree.arena.get_children(expr)[1];
            match &tree.arena.get(index).unwrap().data {
                NodeData::NumericLiteral(num) => num.as_index(),
                _ => panic!("expected numeric literal"),
            }
        })
        .collect();
    assert_eq!(indices, vec![Some(16), None, Some(1000)]);
}

#[test]
fn test_binary_precedence_and_associativity() {
    let tree = parse("a - b - c * d;");
    let expr = first_expression(&tree);
    let NodeData::BinaryExpression(outer) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected binary");
    };
    assert_eq!(outer.operator, SyntaxKind::MinusToken);
    // (a - b) - (c * d)
    let NodeData::BinaryExpression(left) = &tree.arena.get(outer.left).unwrap().data else {
        panic!("expected binary on the left");
    };
    assert_eq!(left.operator, SyntaxKind::MinusToken);
    let NodeData::BinaryExpression(right) = &tree.arena.get(outer.right).unwrap().data else {
        panic!("expected binary on the right");
    };
    assert_eq!(right.operator, SyntaxKind::AsteriskToken);
}

#[test]
fn test_parentheses_are_dropped() {
    let tree = parse("(a + b) * c;");
    let expr = first_expression(&tree);
    let NodeData::BinaryExpression(outer) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected binary");
    };
    assert_eq!(outer.operator, SyntaxKind::AsteriskToken);
    assert_eq!(kind(&tree.arena, outer.left), NodeKind::BinaryExpression);
}

#[test]
fn test_assignment_is_right_associative() {
    let tree = parse("a = b += c;");
    let expr = first_expression(&tree);
    let NodeData::AssignmentExpression(outer) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected assignment");
    };
    assert_eq!(outer.operator, SyntaxKind::EqualsToken);
    let NodeData::AssignmentExpression(inner) = &tree.arena.get(outer.value).unwrap().data
    else {
        panic!("expected nested assignment");
    };
    assert_eq!(inner.operator, SyntaxKind::PlusEqualsToken);
}

#[test]
fn test_comma_expression() {
    let tree = parse("a, b, c;");
    let expr = first_expression(&tree);
    let NodeData::BinaryExpression(outer) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected comma expression");
    };
    assert_eq!(outer.operator, SyntaxKind::CommaToken);
    assert_eq!(kind(&tree.arena, outer.left), NodeKind::BinaryExpression);
}

#[test]
fn test_conditional_expression() {
    let tree = parse("a ? b : c ? d : e;");
    let expr = first_expression(&tree);
    let NodeData::ConditionalExpression(cond) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected conditional");
    };
    assert_eq!(
        kind(&tree.arena, cond.when_false),
        NodeKind::ConditionalExpression
    );
}

#[test]
fn test_new_expression_forms() {
    let tree = parse("new A; new B(1); new a.b.C(); new new D()();");
    let news: Vec<Option<usize>> = statements(&tree)
        .into_iter()
        .map(|stmt| {
            let expr = tree.arena.get_children(stmt)[0];
            match &tree.arena.get(expr).unwrap().data {
                NodeData::NewExpression(new) => new.arguments.as_ref().map(|args| args.len()),
                other => panic!("expected new expression, got {:?}", other.kind()),
            }
        })
        .collect();
    assert_eq!(news, vec![None, Some(1), Some(0), Some(0)]);
}

#[test]
fn test_new_with_member_then_call() {
    let tree = parse("new Foo().bar();");
    let expr = first_expression(&tree);
    let NodeData::CallExpression(call) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected call");
    };
    let NodeData::PropertyAccessExpression(access) = &tree.arena.get(call.callee).unwrap().data
    else {
        panic!("expected property access");
    };
    assert_eq!(kind(&tree.arena, access.object), NodeKind::NewExpression);
}

#[test]
fn test_unary_and_postfix() {
    let tree = parse("!a; typeof b; delete c.d; e++; --f;");
    let ops: Vec<(NodeKind, SyntaxKind)> = statements(&tree)
        .into_iter()
        .map(|stmt| {
            let expr = tree.arena.get_children(stmt)[0];
            match &tree.arena.get(expr).unwrap().data {
                NodeData::PrefixUnaryExpression(u) => (NodeKind::PrefixUnaryExpression, u.operator),
                NodeData::PostfixUnaryExpression(u) => {
                    (NodeKind::PostfixUnaryExpression, u.operator)
                }
                other => panic!("expected unary, got {:?}", other.kind()),
            }
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            (NodeKind::PrefixUnaryExpression, SyntaxKind::ExclamationToken),
            (NodeKind::PrefixUnaryExpression, SyntaxKind::TypeOfKeyword),
            (NodeKind::PrefixUnaryExpression, SyntaxKind::DeleteKeyword),
            (NodeKind::PostfixUnaryExpression, SyntaxKind::PlusPlusToken),
            (NodeKind::PrefixUnaryExpression, SyntaxKind::MinusMinusToken),
        ]
    );
}

#[test]
fn test_postfix_not_across_line_break() {
    let tree = parse("a\n++b");
    assert_eq!(statements(&tree).len(), 2);
    let second = tree.arena.get_children(statements(&tree)[1])[0];
    assert_eq!(
        kind(&tree.arena, second),
        NodeKind::PrefixUnaryExpression
    );
}

#[test]
fn test_automatic_semicolon_insertion() {
    let tree = parse("var a = 1\nvar b = 2\nf()\n");
    assert_eq!(statements(&tree).len(), 3);

    let tree = parse("function f() { return }");
    assert_eq!(statements(&tree).len(), 1);
}

#[test]
fn test_return_restricted_production() {
    let tree = parse("function f() {\n  return\n  a;\n}");
    let func = statements(&tree)[0];
    let NodeData::FunctionDeclaration(data) = &tree.arena.get(func).unwrap().data else {
        panic!("expected function");
    };
    let body = tree.arena.get_children(data.body);
    assert_eq!(body.len(), 2);
    let NodeData::ReturnStatement(ret) = &tree.arena.get(body[0]).unwrap().data else {
        panic!("expected return");
    };
    assert!(ret.expression.is_none());
}

#[test]
fn test_missing_semicolon_on_same_line_is_error() {
    let err = parse_program("test.js", "a b").unwrap_err();
    assert_eq!(err.code, diagnostic_codes::UNEXPECTED_TOKEN);
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 3);
}

#[test]
fn test_statements() {
    let source = r#"
if (a) { b(); } else c();
while (x) break;
do { y(); } while (z)
for (var i = 0; i < n; i++) continue;
for (k in o) {}
for (var k in o) {}
for (;;) {}
switch (s) { case 1: one(); break; default: other(); }
try { t(); } catch (e) { h(e); } finally { done(); }
label: for (;;) { break label; }
with (obj) { p; }
throw new Error('x');
debugger;
;
"#;
    let tree = parse(source);
    let kinds: Vec<NodeKind> = statements(&tree)
        .into_iter()
        .map(|idx| kind(&tree.arena, idx))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoStatement,
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
            NodeKind::ForInStatement,
            NodeKind::ForStatement,
            NodeKind::SwitchStatement,
            NodeKind::TryStatement,
            NodeKind::LabeledStatement,
            NodeKind::WithStatement,
            NodeKind::ThrowStatement,
            NodeKind::DebuggerStatement,
            NodeKind::EmptyStatement,
        ]
    );
}

#[test]
fn test_for_initializer_disallows_in() {
    let tree = parse("for (var i = 'a' in o) {}");
    // `in` ends the initializer, so this is a for-in loop
    assert_eq!(
        kind(&tree.arena, statements(&tree)[0]),
        NodeKind::ForInStatement
    );
    let tree = parse("for (var i = ('a' in o); i; ) {}");
    assert_eq!(
        kind(&tree.arena, statements(&tree)[0]),
        NodeKind::ForStatement
    );
}

#[test]
fn test_object_literal_with_accessors() {
    let tree = parse("x = { a: 1, 'b': 2, 3: c, get d() { return 4; }, set d(v) {}, get: 5 };");
    let expr = first_expression(&tree);
    let NodeData::AssignmentExpression(assign) = &tree.arena.get(expr).unwrap().data else {
        panic!("expected assignment");
    };
    let kinds: Vec<NodeKind> = tree
        .arena
        .get_children(assign.value)
        .into_iter()
        .map(|idx| kind(&tree.arena, idx))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::Accessor,
            NodeKind::Accessor,
            NodeKind::PropertyAssignment,
        ]
    );
}

#[test]
fn test_keyword_property_names() {
    let tree = parse("a.default = b.if;");
    let expr = first_expression(&tree);
    assert_eq!(kind(&tree.arena, expr), NodeKind::AssignmentExpression);
}

#[test]
fn test_regular_expression_literal() {
    let tree = parse("var r = /ab+c/gi.test(s) ? 1 : a / b / c;");
    let mut regexes = Vec::new();
    tree.arena.walk_preorder(tree.root, |_, node| {
        if let NodeData::RegularExpressionLiteral(lit) = &node.data {
            regexes.push(lit.raw.clone());
        }
        true
    });
    assert_eq!(regexes, vec!["/ab+c/gi".to_string()]);
}

#[test]
fn test_string_literal_keeps_raw_text() {
    let tree = parse(r#"x = "a\"b";"#);
    let mut found = None;
    tree.arena.walk_preorder(tree.root, |_, node| {
        if let NodeData::StringLiteral(lit) = &node.data {
            found = Some((lit.raw.clone(), lit.value.clone()));
        }
        true
    });
    assert_eq!(
        found,
        Some((r#""a\"b""#.to_string(), "a\"b".to_string()))
    );
}

#[test]
fn test_node_positions() {
    let source = "var a = [1];\nfoo(a[0]);";
    let tree = parse(source);
    let second = statements(&tree)[1];
    let node = tree.arena.get(second).unwrap();
    assert_eq!(&source[node.pos as usize..node.end as usize], "foo(a[0]);");
    let call = tree.arena.get_children(second)[0];
    let access = tree.arena.get_children(call)[1];
    let node = tree.arena.get(access).unwrap();
    assert_eq!(&source[node.pos as usize..node.end as usize], "a[0]");
}

#[test]
fn test_unterminated_string_is_error() {
    let err = parse_program("test.js", "var a = 'abc").unwrap_err();
    assert_eq!(err.code, diagnostic_codes::UNTERMINATED_STRING_LITERAL);
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse_program("test.js", "var a = [1, 2").unwrap_err();
    assert_eq!(err.code, diagnostic_codes::UNEXPECTED_TOKEN);
    assert!(err.message.contains("end of input"), "{}", err.message);
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse_program("test.js", "1 = a;").unwrap_err();
    assert!(err.message.contains("left-hand side"), "{}", err.message);
}

#[test]
fn test_try_requires_catch_or_finally() {
    assert!(parse_program("test.js", "try {} x();").is_err());
}

#[test]
fn test_error_position_is_one_based() {
    let err = parse_program("test.js", "var a = 1;\nvar b = );").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 9);
    assert_eq!(err.file, "test.js");
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.start, 19);
    assert_eq!(diagnostic.code, diagnostic_codes::UNEXPECTED_TOKEN);
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = 2_000;
    let source = format!("x = {}1{};", "[".repeat(depth), "]".repeat(depth));
    let err = parse_program("test.js", &source).unwrap_err();
    assert_eq!(err.code, diagnostic_codes::NESTING_TOO_DEEP);
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let depth = 50;
    let source = format!("x = {}1{};", "a[".repeat(depth), "]".repeat(depth));
    let tree = parse(&source);
    assert_eq!(statements(&tree).len(), 1);
}

#[test]
fn test_parser_state_api() {
    let mut parser = ParserState::new("input.js", "a;");
    let root = parser.parse_source_file().expect("parse");
    assert_eq!(parser.file_name(), "input.js");
    assert_eq!(parser.get_arena().kind(root), Some(NodeKind::Program));
}
