//! AST node definitions.
//!
//! A [`Node`] is a source span plus a [`NodeData`] payload. Payloads refer to
//! their children by [`NodeIndex`] into the owning arena, never by reference,
//! so a child slot can be overwritten in place without touching the rest of
//! the tree.
//!
//! Parentheses are not represented: the printer re-derives them from
//! operator precedence.

use super::base::{NodeIndex, NodeList};
use jsard_scanner::SyntaxKind;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Node {
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset)
    pub end: u32,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn new(pos: u32, end: u32, data: NodeData) -> Node {
        Node { pos, end, data }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

// =============================================================================
// Typed Data
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
}

/// Program and block bodies.
#[derive(Clone, Debug, Default)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    /// Identifier being declared
    pub name: NodeIndex,
    /// NONE when there is no initializer
    pub initializer: NodeIndex,
}

/// Function declarations and expressions.
#[derive(Clone, Debug)]
pub struct FunctionData {
    /// NONE for anonymous function expressions
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// Always a Block
    pub body: NodeIndex,
}

/// Statements that wrap a single optional expression
/// (expression, return and throw statements).
#[derive(Clone, Debug)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfStatementData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `while` and `do ... while` loops.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForStatementData {
    /// VariableStatement, an expression, or NONE
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForInStatementData {
    /// VariableStatement with one declaration, or an assignment target
    pub initializer: NodeIndex,
    pub object: NodeIndex,
    pub body: NodeIndex,
}

/// `break` and `continue`.
#[derive(Clone, Debug)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct WithStatementData {
    pub object: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchStatementData {
    pub discriminant: NodeIndex,
    /// CaseClause and DefaultClause nodes
    pub clauses: NodeList,
}

/// `case test:` and `default:` clauses. `test` is NONE for default.
#[derive(Clone, Debug)]
pub struct CaseClauseData {
    pub test: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct LabeledStatementData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryStatementData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchClauseData {
    pub parameter: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// String and regular expression literals.
#[derive(Clone, Debug)]
pub struct LiteralData {
    /// Source text including quotes / slashes and flags
    pub raw: String,
    /// Cooked value (unescaped string contents; raw text for regexes)
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct NumericLiteralData {
    pub raw: String,
    /// NaN when the raw text is not a valid numeric literal
    pub value: f64,
}

impl NumericLiteralData {
    /// The value as an array index, if it is a non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        let value = self.value;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Some(value as usize)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArrayLiteralData {
    /// NONE entries are holes (`[1,,2]`)
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ObjectLiteralData {
    /// PropertyAssignment and Accessor nodes
    pub properties: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    /// Identifier, StringLiteral or NumericLiteral
    pub name: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AccessorData {
    pub kind: AccessorKind,
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PropertyAccessData {
    pub object: NodeIndex,
    /// Identifier
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ElementAccessData {
    pub object: NodeIndex,
    pub index: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct NewData {
    pub callee: NodeIndex,
    /// None for `new C` without an argument list
    pub arguments: Option<NodeList>,
}

/// Prefix and postfix unary expressions.
#[derive(Clone, Debug)]
pub struct UnaryData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

impl UnaryData {
    /// `++`, `--` and `delete` need a reference operand.
    pub fn requires_reference(&self) -> bool {
        matches!(
            self.operator,
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken | SyntaxKind::DeleteKeyword
        )
    }
}

/// Binary expressions, including `,`, `&&`, `||`, `in` and `instanceof`.
#[derive(Clone, Debug)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub operator: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct AssignmentData {
    pub target: NodeIndex,
    pub operator: SyntaxKind,
    pub value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

// =============================================================================
// Node payload
// =============================================================================

#[derive(Clone, Debug)]
pub enum NodeData {
    Program(BlockData),

    // Statements
    Block(BlockData),
    EmptyStatement,
    DebuggerStatement,
    VariableStatement(VariableStatementData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    ExpressionStatement(ExpressionStatementData),
    IfStatement(IfStatementData),
    DoStatement(LoopData),
    WhileStatement(LoopData),
    ForStatement(ForStatementData),
    ForInStatement(ForInStatementData),
    ContinueStatement(JumpData),
    BreakStatement(JumpData),
    ReturnStatement(ExpressionStatementData),
    WithStatement(WithStatementData),
    SwitchStatement(SwitchStatementData),
    CaseClause(CaseClauseData),
    DefaultClause(CaseClauseData),
    LabeledStatement(LabeledStatementData),
    ThrowStatement(ExpressionStatementData),
    TryStatement(TryStatementData),
    CatchClause(CatchClauseData),

    // Primary expressions
    Identifier(IdentifierData),
    StringLiteral(LiteralData),
    NumericLiteral(NumericLiteralData),
    RegularExpressionLiteral(LiteralData),
    BooleanLiteral(bool),
    NullLiteral,
    ThisKeyword,
    ArrayLiteralExpression(ArrayLiteralData),
    ObjectLiteralExpression(ObjectLiteralData),
    PropertyAssignment(PropertyAssignmentData),
    Accessor(AccessorData),
    FunctionExpression(FunctionData),

    // Compound expressions
    PropertyAccessExpression(PropertyAccessData),
    ElementAccessExpression(ElementAccessData),
    CallExpression(CallData),
    NewExpression(NewData),
    PrefixUnaryExpression(UnaryData),
    PostfixUnaryExpression(UnaryData),
    BinaryExpression(BinaryData),
    AssignmentExpression(AssignmentData),
    ConditionalExpression(ConditionalData),
}

/// Fieldless mirror of [`NodeData`] for matching and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Block,
    EmptyStatement,
    DebuggerStatement,
    VariableStatement,
    VariableDeclaration,
    FunctionDeclaration,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    CaseClause,
    DefaultClause,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    Identifier,
    StringLiteral,
    NumericLiteral,
    RegularExpressionLiteral,
    BooleanLiteral,
    NullLiteral,
    ThisKeyword,
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAssignment,
    Accessor,
    FunctionExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    ConditionalExpression,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::Block => "Block",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::VariableStatement => "VariableStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::DoStatement => "DoStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::WithStatement => "WithStatement",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::CaseClause => "CaseClause",
            NodeKind::DefaultClause => "DefaultClause",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::ThrowStatement => "ThrowStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::Identifier => "Identifier",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::NumericLiteral => "NumericLiteral",
            NodeKind::RegularExpressionLiteral => "RegularExpressionLiteral",
            NodeKind::BooleanLiteral => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::ThisKeyword => "ThisKeyword",
            NodeKind::ArrayLiteralExpression => "ArrayLiteralExpression",
            NodeKind::ObjectLiteralExpression => "ObjectLiteralExpression",
            NodeKind::PropertyAssignment => "PropertyAssignment",
            NodeKind::Accessor => "Accessor",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::PropertyAccessExpression => "PropertyAccessExpression",
            NodeKind::ElementAccessExpression => "ElementAccessExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::NewExpression => "NewExpression",
            NodeKind::PrefixUnaryExpression => "PrefixUnaryExpression",
            NodeKind::PostfixUnaryExpression => "PostfixUnaryExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::ConditionalExpression => "ConditionalExpression",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Program(_) => NodeKind::Program,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::EmptyStatement => NodeKind::EmptyStatement,
            NodeData::DebuggerStatement => NodeKind::DebuggerStatement,
            NodeData::VariableStatement(_) => NodeKind::VariableStatement,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::IfStatement(_) => NodeKind::IfStatement,
            NodeData::DoStatement(_) => NodeKind::DoStatement,
            NodeData::WhileStatement(_) => NodeKind::WhileStatement,
            NodeData::ForStatement(_) => NodeKind::ForStatement,
            NodeData::ForInStatement(_) => NodeKind::ForInStatement,
            NodeData::ContinueStatement(_) => NodeKind::ContinueStatement,
            NodeData::BreakStatement(_) => NodeKind::BreakStatement,
            NodeData::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeData::WithStatement(_) => NodeKind::WithStatement,
            NodeData::SwitchStatement(_) => NodeKind::SwitchStatement,
            NodeData::CaseClause(_) => NodeKind::CaseClause,
            NodeData::DefaultClause(_) => NodeKind::DefaultClause,
            NodeData::LabeledStatement(_) => NodeKind::LabeledStatement,
            NodeData::ThrowStatement(_) => NodeKind::ThrowStatement,
            NodeData::TryStatement(_) => NodeKind::TryStatement,
            NodeData::CatchClause(_) => NodeKind::CatchClause,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::NumericLiteral(_) => NodeKind::NumericLiteral,
            NodeData::RegularExpressionLiteral(_) => NodeKind::RegularExpressionLiteral,
            NodeData::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            NodeData::NullLiteral => NodeKind::NullLiteral,
            NodeData::ThisKeyword => NodeKind::ThisKeyword,
            NodeData::ArrayLiteralExpression(_) => NodeKind::ArrayLiteralExpression,
            NodeData::ObjectLiteralExpression(_) => NodeKind::ObjectLiteralExpression,
            NodeData::PropertyAssignment(_) => NodeKind::PropertyAssignment,
            NodeData::Accessor(_) => NodeKind::Accessor,
            NodeData::FunctionExpression(_) => NodeKind::FunctionExpression,
            NodeData::PropertyAccessExpression(_) => NodeKind::PropertyAccessExpression,
            NodeData::ElementAccessExpression(_) => NodeKind::ElementAccessExpression,
            NodeData::CallExpression(_) => NodeKind::CallExpression,
            NodeData::NewExpression(_) => NodeKind::NewExpression,
            NodeData::PrefixUnaryExpression(_) => NodeKind::PrefixUnaryExpression,
            NodeData::PostfixUnaryExpression(_) => NodeKind::PostfixUnaryExpression,
            NodeData::BinaryExpression(_) => NodeKind::BinaryExpression,
            NodeData::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            NodeData::ConditionalExpression(_) => NodeKind::ConditionalExpression,
        }
    }

    /// Visit every present child in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeIndex)) {
        let mut one = |idx: NodeIndex| {
            if idx.is_some() {
                f(idx);
            }
        };
        match self {
            NodeData::Program(block) | NodeData::Block(block) => {
                block.statements.iter().for_each(&mut one);
            }
            NodeData::VariableStatement(stmt) => stmt.declarations.iter().for_each(&mut one),
            NodeData::VariableDeclaration(decl) => {
                one(decl.name);
                one(decl.initializer);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                one(func.name);
                func.parameters.iter().for_each(&mut one);
                one(func.body);
            }
            NodeData::ExpressionStatement(stmt)
            | NodeData::ReturnStatement(stmt)
            | NodeData::ThrowStatement(stmt) => one(stmt.expression),
            NodeData::IfStatement(stmt) => {
                one(stmt.condition);
                one(stmt.then_statement);
                one(stmt.else_statement);
            }
            NodeData::DoStatement(stmt) => {
                one(stmt.body);
                one(stmt.condition);
            }
            NodeData::WhileStatement(stmt) => {
                one(stmt.condition);
                one(stmt.body);
            }
            NodeData::ForStatement(stmt) => {
                one(stmt.initializer);
                one(stmt.condition);
                one(stmt.incrementor);
                one(stmt.body);
            }
            NodeData::ForInStatement(stmt) => {
                one(stmt.initializer);
                one(stmt.object);
                one(stmt.body);
            }
            NodeData::ContinueStatement(jump) | NodeData::BreakStatement(jump) => one(jump.label),
            NodeData::WithStatement(stmt) => {
                one(stmt.object);
                one(stmt.body);
            }
            NodeData::SwitchStatement(stmt) => {
                one(stmt.discriminant);
                stmt.clauses.iter().for_each(&mut one);
            }
            NodeData::CaseClause(clause) | NodeData::DefaultClause(clause) => {
                one(clause.test);
                clause.statements.iter().for_each(&mut one);
            }
            NodeData::LabeledStatement(stmt) => {
                one(stmt.label);
                one(stmt.statement);
            }
            NodeData::TryStatement(stmt) => {
                one(stmt.try_block);
                one(stmt.catch_clause);
                one(stmt.finally_block);
            }
            NodeData::CatchClause(clause) => {
                one(clause.parameter);
                one(clause.block);
            }
            NodeData::ArrayLiteralExpression(arr) => arr.elements.iter().for_each(&mut one),
            NodeData::ObjectLiteralExpression(obj) => obj.properties.iter().for_each(&mut one),
            NodeData::PropertyAssignment(prop) => {
                one(prop.name);
                one(prop.value);
            }
            NodeData::Accessor(accessor) => {
                one(accessor.name);
                accessor.parameters.iter().for_each(&mut one);
                one(accessor.body);
            }
            NodeData::PropertyAccessExpression(access) => {
                one(access.object);
                one(access.name);
            }
            NodeData::ElementAccessExpression(access) => {
                one(access.object);
                one(access.index);
            }
            NodeData::CallExpression(call) => {
                one(call.callee);
                call.arguments.iter().for_each(&mut one);
            }
            NodeData::NewExpression(new) => {
                one(new.callee);
                if let Some(args) = &new.arguments {
                    args.iter().for_each(&mut one);
                }
            }
            NodeData::PrefixUnaryExpression(unary) | NodeData::PostfixUnaryExpression(unary) => {
                one(unary.operand)
            }
            NodeData::BinaryExpression(binary) => {
                one(binary.left);
                one(binary.right);
            }
            NodeData::AssignmentExpression(assign) => {
                one(assign.target);
                one(assign.value);
            }
            NodeData::ConditionalExpression(cond) => {
                one(cond.condition);
                one(cond.when_true);
                one(cond.when_false);
            }
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::StringLiteral(_)
            | NodeData::NumericLiteral(_)
            | NodeData::RegularExpressionLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::ThisKeyword => {}
        }
    }

    /// Rewrite every present child index in place, in source order.
    pub fn map_children(&mut self, mut f: impl FnMut(NodeIndex) -> NodeIndex) {
        let mut one = |idx: &mut NodeIndex| {
            if idx.is_some() {
                *idx = f(*idx);
            }
        };
        fn list(list: &mut NodeList, one: &mut dyn FnMut(&mut NodeIndex)) {
            list.nodes.iter_mut().for_each(one);
        }
        match self {
            NodeData::Program(block) | NodeData::Block(block) => {
                list(&mut block.statements, &mut one);
            }
            NodeData::VariableStatement(stmt) => list(&mut stmt.declarations, &mut one),
            NodeData::VariableDeclaration(decl) => {
                one(&mut decl.name);
                one(&mut decl.initializer);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                one(&mut func.name);
                list(&mut func.parameters, &mut one);
                one(&mut func.body);
            }
            NodeData::ExpressionStatement(stmt)
            | NodeData::ReturnStatement(stmt)
            | NodeData::ThrowStatement(stmt) => one(&mut stmt.expression),
            NodeData::IfStatement(stmt) => {
                one(&mut stmt.condition);
                one(&mut stmt.then_statement);
                one(&mut stmt.else_statement);
            }
            NodeData::DoStatement(stmt) => {
                one(&mut stmt.body);
                one(&mut stmt.condition);
            }
            NodeData::WhileStatement(stmt) => {
                one(&mut stmt.condition);
                one(&mut stmt.body);
            }
            NodeData::ForStatement(stmt) => {
                one(&mut stmt.initializer);
                one(&mut stmt.condition);
                one(&mut stmt.incrementor);
                one(&mut stmt.body);
            }
            NodeData::ForInStatement(stmt) => {
                one(&mut stmt.initializer);
                one(&mut stmt.object);
                one(&mut stmt.body);
            }
            NodeData::ContinueStatement(jump) | NodeData::BreakStatement(jump) => {
                one(&mut jump.label)
            }
            NodeData::WithStatement(stmt) => {
                one(&mut stmt.object);
                one(&mut stmt.body);
            }
            NodeData::SwitchStatement(stmt) => {
                one(&mut stmt.discriminant);
                list(&mut stmt.clauses, &mut one);
            }
            NodeData::CaseClause(clause) | NodeData::DefaultClause(clause) => {
                one(&mut clause.test);
                list(&mut clause.statements, &mut one);
            }
            NodeData::LabeledStatement(stmt) => {
                one(&mut stmt.label);
                one(&mut stmt.statement);
            }
            NodeData::TryStatement(stmt) => {
                one(&mut stmt.try_block);
                one(&mut stmt.catch_clause);
                one(&mut stmt.finally_block);
            }
            NodeData::CatchClause(clause) => {
                one(&mut clause.parameter);
                one(&mut clause.block);
            }
            NodeData::ArrayLiteralExpression(arr) => list(&mut arr.elements, &mut one),
            NodeData::ObjectLiteralExpression(obj) => list(&mut obj.properties, &mut one),
            NodeData::PropertyAssignment(prop) => {
                one(&mut prop.name);
                one(&mut prop.value);
            }
            NodeData::Accessor(accessor) => {
                one(&mut accessor.name);
                list(&mut accessor.parameters, &mut one);
                one(&mut accessor.body);
            }
            NodeData::PropertyAccessExpression(access) => {
                one(&mut access.object);
                one(&mut access.name);
            }
            NodeData::ElementAccessExpression(access) => {
                one(&mut access.object);
                one(&mut access.index);
            }
            NodeData::CallExpression(call) => {
                one(&mut call.callee);
                list(&mut call.arguments, &mut one);
            }
            NodeData::NewExpression(new) => {
                one(&mut new.callee);
                if let Some(args) = &mut new.arguments {
                    list(args, &mut one);
                }
            }
            NodeData::PrefixUnaryExpression(unary) | NodeData::PostfixUnaryExpression(unary) => {
                one(&mut unary.operand)
            }
            NodeData::BinaryExpression(binary) => {
                one(&mut binary.left);
                one(&mut binary.right);
            }
            NodeData::AssignmentExpression(assign) => {
                one(&mut assign.target);
                one(&mut assign.value);
            }
            NodeData::ConditionalExpression(cond) => {
                one(&mut cond.condition);
                one(&mut cond.when_true);
                one(&mut cond.when_false);
            }
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::StringLiteral(_)
            | NodeData::NumericLiteral(_)
            | NodeData::RegularExpressionLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::ThisKeyword => {}
        }
    }
}
