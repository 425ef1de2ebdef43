//! Expression slot capability: which parents expose which child positions.

use jsard_parser::parser::node::*;
use jsard_parser::{
    ExpressionSlots, NodeIndex, NodeKind, SlotError, SlotName, SyntaxTree, parse_program,
};

fn parse(source: &str) -> SyntaxTree {
    match parse_program("test.js", source) {
        Ok(tree) => tree,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

/// First node of `kind` in pre-order.
fn find(tree: &SyntaxTree, kind: NodeKind) -> NodeIndex {
    let mut found = NodeIndex::NONE;
    tree.arena.walk_preorder(tree.root, |idx, node| {
        if found.is_none() && node.kind() == kind {
            found = idx;
        }
        found.is_none()
    });
    assert!(found.is_some(), "no {kind} in tree");
    found
}

/// First `arr[...]` element access in pre-order.
fn find_reference(tree: &SyntaxTree) -> NodeIndex {
    let mut found = NodeIndex::NONE;
    tree.arena.walk_preorder(tree.root, |idx, node| {
        if found.is_none()
            && let NodeData::ElementAccessExpression(access) = &node.data
            && tree.arena.identifier_text(access.object) == Some("arr")
        {
            found = idx;
        }
        found.is_none()
    });
    assert!(found.is_some(), "no reference in tree");
    found
}

fn slot_names(tree: &SyntaxTree, parent: NodeIndex) -> Vec<SlotName> {
    tree.arena
        .expression_slots(parent)
        .expect("parent exists")
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

#[test]
fn test_slots_per_parent_kind() {
    let cases: &[(&str, NodeKind, &[SlotName])] = &[
        (
            "f(arr[0], x);",
            NodeKind::CallExpression,
            &[SlotName::Callee, SlotName::Argument(0), SlotName::Argument(1)],
        ),
        (
            "new F(arr[0]);",
            NodeKind::NewExpression,
            &[SlotName::Callee, SlotName::Argument(0)],
        ),
        ("new F;", NodeKind::NewExpression, &[SlotName::Callee]),
        (
            "x = [arr[0], , y];",
            NodeKind::ArrayLiteralExpression,
            &[SlotName::Element(0), SlotName::Element(2)],
        ),
        (
            "switch (arr[0]) {}",
            NodeKind::SwitchStatement,
            &[SlotName::Discriminant],
        ),
        (
            "switch (x) { case arr[0]: }",
            NodeKind::CaseClause,
            &[SlotName::Test],
        ),
        ("switch (x) { default: }", NodeKind::DefaultClause, &[]),
        (
            "var v = arr[0];",
            NodeKind::VariableDeclaration,
            &[SlotName::Initializer],
        ),
        ("x = arr[0];", NodeKind::AssignmentExpression, &[SlotName::Value]),
        (
            "arr[0] + 1;",
            NodeKind::BinaryExpression,
            &[SlotName::Left, SlotName::Right],
        ),
        (
            "c ? arr[0] : arr[1];",
            NodeKind::ConditionalExpression,
            &[SlotName::Condition, SlotName::WhenTrue, SlotName::WhenFalse],
        ),
        (
            "function f() { return arr[0]; }",
            NodeKind::ReturnStatement,
            &[SlotName::Expression],
        ),
        ("function f() { return; }", NodeKind::ReturnStatement, &[]),
        (
            "arr[0];",
            NodeKind::ExpressionStatement,
            &[SlotName::Expression],
        ),
        (
            "arr[0].length;",
            NodeKind::PropertyAccessExpression,
            &[SlotName::Object],
        ),
        (
            "x[arr[0]];",
            NodeKind::ElementAccessExpression,
            &[SlotName::Object, SlotName::Index],
        ),
        ("!arr[0];", NodeKind::PrefixUnaryExpression, &[SlotName::Operand]),
        ("if (arr[0]) {}", NodeKind::IfStatement, &[SlotName::Condition]),
        ("while (arr[0]) {}", NodeKind::WhileStatement, &[SlotName::Condition]),
        ("do {} while (arr[0]);", NodeKind::DoStatement, &[SlotName::Condition]),
        (
            "for (i = 0; i < 1; i++) {}",
            NodeKind::ForStatement,
            &[SlotName::Initializer, SlotName::Condition, SlotName::Incrementor],
        ),
        ("for (;;) {}", NodeKind::ForStatement, &[]),
        ("for (k in arr[0]) {}", NodeKind::ForInStatement, &[SlotName::Object]),
        ("throw arr[0];", NodeKind::ThrowStatement, &[SlotName::Expression]),
        ("with (arr[0]) {}", NodeKind::WithStatement, &[SlotName::Object]),
        (
            "x = { k: arr[0] };",
            NodeKind::PropertyAssignment,
            &[SlotName::Value],
        ),
    ];

    for (source, kind, expected) in cases {
        let tree = parse(source);
        let parent = find(&tree, *kind);
        assert_eq!(&slot_names(&tree, parent), expected, "slots of {kind} in {source:?}");
    }
}

#[test]
fn test_unsupported_parents_expose_no_slots() {
    let cases: &[(&str, NodeKind)] = &[
        ("arr[0]++;", NodeKind::PostfixUnaryExpression),
        ("delete arr[0];", NodeKind::PrefixUnaryExpression),
        ("++arr[0];", NodeKind::PrefixUnaryExpression),
        ("x = { k: 1 };", NodeKind::ObjectLiteralExpression),
        ("{ arr[0]; }", NodeKind::Block),
    ];
    for (source, kind) in cases {
        let tree = parse(source);
        let parent = find(&tree, *kind);
        assert!(
            slot_names(&tree, parent).is_empty(),
            "{kind} in {source:?} should expose no slots"
        );
    }
}

#[test]
fn test_find_slot_matches_by_identity() {
    // Two structurally equal children resolve to their own slots
    let tree = parse("arr[0] + arr[0];");
    let parent = find(&tree, NodeKind::BinaryExpression);
    let NodeData::BinaryExpression(binary) = &tree.arena.get(parent).unwrap().data else {
        panic!("expected binary");
    };
    assert_eq!(
        tree.arena.find_slot(parent, binary.left),
        Ok(SlotName::Left)
    );
    assert_eq!(
        tree.arena.find_slot(parent, binary.right),
        Ok(SlotName::Right)
    );
}

#[test]
fn test_find_slot_errors() {
    let tree = parse("arr[0]++; x = arr[1];");

    let postfix = find(&tree, NodeKind::PostfixUnaryExpression);
    let reference = find_reference(&tree);
    assert_eq!(
        tree.arena.find_slot(postfix, reference),
        Err(SlotError::UnsupportedParent {
            kind: NodeKind::PostfixUnaryExpression
        })
    );

    // The assignment target is not a slot
    let assign = find(&tree, NodeKind::AssignmentExpression);
    let NodeData::AssignmentExpression(data) = &tree.arena.get(assign).unwrap().data else {
        panic!("expected assignment");
    };
    assert!(matches!(
        tree.arena.find_slot(assign, data.target),
        Err(SlotError::ChildNotInSlot { .. })
    ));

    assert_eq!(
        tree.arena.find_slot(NodeIndex(9_999), reference),
        Err(SlotError::MissingNode(NodeIndex(9_999)))
    );
}

#[test]
fn test_replace_child_rewrites_one_slot() {
    let mut tree = parse("f(arr[0], arr[0]);");
    let call = find(&tree, NodeKind::CallExpression);
    let NodeData::CallExpression(data) = tree.arena.get(call).unwrap().data.clone() else {
        panic!("expected call");
    };
    let second = data.arguments.nodes[1];

    let replacement = tree.arena.clone_subtree(data.callee);
    let slot = tree
        .arena
        .replace_child(call, second, replacement)
        .expect("replace");
    assert_eq!(slot, SlotName::Argument(1));

    let NodeData::CallExpression(after) = &tree.arena.get(call).unwrap().data else {
        panic!("expected call");
    };
    assert_eq!(after.arguments.nodes[0], data.arguments.nodes[0]);
    assert_eq!(after.arguments.nodes[1], replacement);
}

#[test]
fn test_set_slot_rejects_unknown_slot() {
    let mut tree = parse("x = arr[0];");
    let assign = find(&tree, NodeKind::AssignmentExpression);
    let err = tree
        .arena
        .set_slot(assign, SlotName::Left, NodeIndex::NONE)
        .unwrap_err();
    assert_eq!(
        err,
        SlotError::UnsupportedParent {
            kind: NodeKind::AssignmentExpression
        }
    );
}

#[test]
fn test_slot_mut_on_payload() {
    let mut data = NodeData::ConditionalExpression(ConditionalData {
        condition: NodeIndex(1),
        when_true: NodeIndex(2),
        when_false: NodeIndex(3),
    });
    *data.slot_mut(SlotName::WhenFalse).unwrap() = NodeIndex(7);
    assert_eq!(
        data.slots().to_vec(),
        vec![
            (SlotName::Condition, NodeIndex(1)),
            (SlotName::WhenTrue, NodeIndex(2)),
            (SlotName::WhenFalse, NodeIndex(7)),
        ]
    );
    assert!(data.slot_mut(SlotName::Operand).is_none());
}

#[test]
fn test_slot_name_display() {
    assert_eq!(SlotName::Argument(2).to_string(), "arguments[2]");
    assert_eq!(SlotName::WhenTrue.to_string(), "whenTrue");
}
