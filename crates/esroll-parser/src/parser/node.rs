//! AST node types.
//!
//! Nodes live in a [`NodeArena`](super::NodeArena) and refer to each other by
//! [`NodeIndex`]. Every node records its byte range `[pos, end)` in the module
//! source; for statements this range is what the bundler copies into the
//! output.
//!
//! `NodeData` is a closed enum over the ECMAScript module grammar. Names that
//! never take part in scope resolution (property keys, labels, import/export
//! specifier names, meta properties) are stored inline as strings instead of
//! as `Identifier` nodes, so every `Identifier` node in the tree is either a
//! binding or a reference, with one exception: the non-computed property of a
//! `MemberExpression`.

use esroll_common::Span;
use esroll_scanner::SyntaxKind;
use serde::Serialize;

/// Index of a node in its arena. `NodeIndex::NONE` marks an absent child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub pos: u32,
    pub end: u32,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.pos, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    /// `let` and `const` bindings are block scoped.
    #[inline]
    pub fn is_block_scoped(self) -> bool {
        !matches!(self, VarKind::Var)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// Raw numeric text, e.g. `0x1F`.
    Number(String),
    /// Cooked string value.
    String(String),
    BigInt(String),
    /// Raw regex text including slashes and flags.
    RegExp(String),
    Boolean(bool),
    Null,
}

/// The key of an object property, class member or pattern property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKey {
    /// Identifier, string or numeric key written literally.
    Name(String),
    /// `#name` class member.
    Private(String),
    /// `[expr]`
    Computed(NodeIndex),
}

impl PropertyKey {
    pub fn name(&self) -> Option<&str> {
        match self {
            PropertyKey::Name(name) | PropertyKey::Private(name) => Some(name),
            PropertyKey::Computed(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
    Method,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// Shared shape of function declarations, function expressions and methods.
#[derive(Clone, Debug)]
pub struct Function {
    /// Identifier node, or NONE for anonymous functions and methods.
    pub id: NodeIndex,
    pub params: Vec<NodeIndex>,
    /// Always a `BlockStatement`.
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug)]
pub struct Class {
    pub id: NodeIndex,
    pub super_class: NodeIndex,
    /// `MethodDefinition`, `PropertyDefinition` and `StaticBlock` nodes.
    pub body: Vec<NodeIndex>,
}

/// One binding of an import declaration.
///
/// `imported` is `"default"` for default imports and `"*"` for namespace
/// imports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    /// Root of a parsed module.
    Program { body: Vec<NodeIndex> },

    // Statements
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeIndex>,
    },
    VariableDeclarator {
        id: NodeIndex,
        init: NodeIndex,
    },
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    ExpressionStatement {
        expression: NodeIndex,
    },
    BlockStatement {
        body: Vec<NodeIndex>,
    },
    EmptyStatement,
    DebuggerStatement,
    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    ForStatement {
        init: NodeIndex,
        test: NodeIndex,
        update: NodeIndex,
        body: NodeIndex,
    },
    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
    },
    ForOfStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
        is_await: bool,
    },
    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    },
    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    },
    ReturnStatement {
        argument: NodeIndex,
    },
    BreakStatement {
        label: Option<String>,
    },
    ContinueStatement {
        label: Option<String>,
    },
    ThrowStatement {
        argument: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        handler: NodeIndex,
        finalizer: NodeIndex,
    },
    CatchClause {
        param: NodeIndex,
        body: NodeIndex,
    },
    SwitchStatement {
        discriminant: NodeIndex,
        cases: Vec<NodeIndex>,
    },
    SwitchCase {
        test: NodeIndex,
        consequent: Vec<NodeIndex>,
    },
    LabeledStatement {
        label: String,
        body: NodeIndex,
    },
    WithStatement {
        object: NodeIndex,
        body: NodeIndex,
    },

    // Module declarations
    ImportDeclaration {
        specifiers: Vec<ImportSpecifier>,
        source: String,
    },
    /// `export <declaration>`, `export { a as b }` and
    /// `export { a } from '...'`.
    ExportNamedDeclaration {
        declaration: NodeIndex,
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
    },
    /// `export default <declaration or expression>`.
    ExportDefaultDeclaration {
        declaration: NodeIndex,
    },
    /// `export * from '...'` and `export * as ns from '...'`.
    ExportAllDeclaration {
        exported: Option<String>,
        source: String,
    },

    // Expressions
    Identifier {
        name: String,
    },
    PrivateName {
        name: String,
    },
    Literal(Literal),
    TemplateLiteral {
        quasis: Vec<String>,
        expressions: Vec<NodeIndex>,
    },
    TaggedTemplateExpression {
        tag: NodeIndex,
        quasi: NodeIndex,
    },
    ThisExpression,
    Super,
    ArrayExpression {
        /// NONE marks a hole.
        elements: Vec<NodeIndex>,
    },
    ObjectExpression {
        properties: Vec<NodeIndex>,
    },
    Property {
        key: PropertyKey,
        value: NodeIndex,
        kind: PropertyKind,
        shorthand: bool,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<NodeIndex>,
        /// A `BlockStatement`, or an expression for concise bodies.
        body: NodeIndex,
        is_async: bool,
    },
    ClassExpression(Class),
    UnaryExpression {
        operator: SyntaxKind,
        argument: NodeIndex,
    },
    UpdateExpression {
        operator: SyntaxKind,
        prefix: bool,
        argument: NodeIndex,
    },
    /// Arithmetic, relational and logical binary operators.
    BinaryExpression {
        operator: SyntaxKind,
        left: NodeIndex,
        right: NodeIndex,
    },
    AssignmentExpression {
        operator: SyntaxKind,
        left: NodeIndex,
        right: NodeIndex,
    },
    ConditionalExpression {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    CallExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        optional: bool,
    },
    NewExpression {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    MemberExpression {
        object: NodeIndex,
        /// `Identifier` or `PrivateName` when not computed.
        property: NodeIndex,
        computed: bool,
        optional: bool,
    },
    SequenceExpression {
        expressions: Vec<NodeIndex>,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    SpreadElement {
        argument: NodeIndex,
    },
    YieldExpression {
        argument: NodeIndex,
        delegate: bool,
    },
    AwaitExpression {
        argument: NodeIndex,
    },
    /// Dynamic `import(source)`.
    ImportExpression {
        source: NodeIndex,
    },
    /// `new.target` or `import.meta`.
    MetaProperty {
        meta: String,
        property: String,
    },

    // Patterns
    ObjectPattern {
        /// `Property` nodes (value is the target pattern) and `RestElement`.
        properties: Vec<NodeIndex>,
    },
    ArrayPattern {
        elements: Vec<NodeIndex>,
    },
    AssignmentPattern {
        left: NodeIndex,
        right: NodeIndex,
    },
    RestElement {
        argument: NodeIndex,
    },

    // Class members
    MethodDefinition {
        key: PropertyKey,
        /// A `FunctionExpression`.
        value: NodeIndex,
        kind: MethodKind,
        is_static: bool,
    },
    PropertyDefinition {
        key: PropertyKey,
        value: NodeIndex,
        is_static: bool,
    },
    StaticBlock {
        body: Vec<NodeIndex>,
    },
}

impl NodeData {
    /// Short kind name for diagnostics and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeData::Program { .. } => "Program",
            NodeData::VariableDeclaration { .. } => "VariableDeclaration",
            NodeData::VariableDeclarator { .. } => "VariableDeclarator",
            NodeData::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeData::ClassDeclaration(_) => "ClassDeclaration",
            NodeData::ExpressionStatement { .. } => "ExpressionStatement",
            NodeData::BlockStatement { .. } => "BlockStatement",
            NodeData::EmptyStatement => "EmptyStatement",
            NodeData::DebuggerStatement => "DebuggerStatement",
            NodeData::IfStatement { .. } => "IfStatement",
            NodeData::ForStatement { .. } => "ForStatement",
            NodeData::ForInStatement { .. } => "ForInStatement",
            NodeData::ForOfStatement { .. } => "ForOfStatement",
            NodeData::WhileStatement { .. } => "WhileStatement",
            NodeData::DoWhileStatement { .. } => "DoWhileStatement",
            NodeData::ReturnStatement { .. } => "ReturnStatement",
            NodeData::BreakStatement { .. } => "BreakStatement",
            NodeData::ContinueStatement { .. } => "ContinueStatement",
            NodeData::ThrowStatement { .. } => "ThrowStatement",
            NodeData::TryStatement { .. } => "TryStatement",
            NodeData::CatchClause { .. } => "CatchClause",
            NodeData::SwitchStatement { .. } => "SwitchStatement",
            NodeData::SwitchCase { .. } => "SwitchCase",
            NodeData::LabeledStatement { .. } => "LabeledStatement",
            NodeData::WithStatement { .. } => "WithStatement",
            NodeData::ImportDeclaration { .. } => "ImportDeclaration",
            NodeData::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeData::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeData::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            NodeData::Identifier { .. } => "Identifier",
            NodeData::PrivateName { .. } => "PrivateName",
            NodeData::Literal(_) => "Literal",
            NodeData::TemplateLiteral { .. } => "TemplateLiteral",
            NodeData::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            NodeData::ThisExpression => "ThisExpression",
            NodeData::Super => "Super",
            NodeData::ArrayExpression { .. } => "ArrayExpression",
            NodeData::ObjectExpression { .. } => "ObjectExpression",
            NodeData::Property { .. } => "Property",
            NodeData::FunctionExpression(_) => "FunctionExpression",
            NodeData::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeData::ClassExpression(_) => "ClassExpression",
            NodeData::UnaryExpression { .. } => "UnaryExpression",
            NodeData::UpdateExpression { .. } => "UpdateExpression",
            NodeData::BinaryExpression { .. } => "BinaryExpression",
            NodeData::AssignmentExpression { .. } => "AssignmentExpression",
            NodeData::ConditionalExpression { .. } => "ConditionalExpression",
            NodeData::CallExpression { .. } => "CallExpression",
            NodeData::NewExpression { .. } => "NewExpression",
            NodeData::MemberExpression { .. } => "MemberExpression",
            NodeData::SequenceExpression { .. } => "SequenceExpression",
            NodeData::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            NodeData::SpreadElement { .. } => "SpreadElement",
            NodeData::YieldExpression { .. } => "YieldExpression",
            NodeData::AwaitExpression { .. } => "AwaitExpression",
            NodeData::ImportExpression { .. } => "ImportExpression",
            NodeData::MetaProperty { .. } => "MetaProperty",
            NodeData::ObjectPattern { .. } => "ObjectPattern",
            NodeData::ArrayPattern { .. } => "ArrayPattern",
            NodeData::AssignmentPattern { .. } => "AssignmentPattern",
            NodeData::RestElement { .. } => "RestElement",
            NodeData::MethodDefinition { .. } => "MethodDefinition",
            NodeData::PropertyDefinition { .. } => "PropertyDefinition",
            NodeData::StaticBlock { .. } => "StaticBlock",
        }
    }

    pub fn is_import_declaration(&self) -> bool {
        matches!(self, NodeData::ImportDeclaration { .. })
    }

    /// Any of the three `export` statement forms.
    pub fn is_export_declaration(&self) -> bool {
        matches!(
            self,
            NodeData::ExportNamedDeclaration { .. }
                | NodeData::ExportDefaultDeclaration { .. }
                | NodeData::ExportAllDeclaration { .. }
        )
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            NodeData::Identifier { name } => Some(name),
            _ => None,
        }
    }
}
