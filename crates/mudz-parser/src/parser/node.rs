//! AST node definitions.
//!
//! Every node lives in a `NodeArena` and is addressed by `NodeIndex`. A node
//! owns a `[pos, end)` byte range and a `NodeData` payload; composite payloads
//! reference their children by index, so the arena is a pure tree with
//! parent-to-child ownership only.

use super::base::NodeIndex;
use bitflags::bitflags;
use mudz_common::TextRange;
use mudz_scanner::SyntaxKind;
use serde::Serialize;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct ModifierFlags: u16 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const NOMASK = 1 << 4;
        const VARARGS = 1 << 5;
        const NOSAVE = 1 << 6;
        const OVERRIDE = 1 << 7;
    }
}

impl ModifierFlags {
    pub fn from_keyword(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::NomaskKeyword => ModifierFlags::NOMASK,
            SyntaxKind::VarargsKeyword => ModifierFlags::VARARGS,
            SyntaxKind::NosaveKeyword => ModifierFlags::NOSAVE,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            _ => ModifierFlags::empty(),
        }
    }
}

/// The syntactic category a sentinel node stands in for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExpectedKind {
    Literal,
    Type,
    Identifier,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum LiteralValue {
    Int(i64),
    String(String),
    Char(char),
    Symbol(String),
    Bool(bool),
    Nil,
    This,
}

/// A parenthesized argument list; `pos`/`end` span the parentheses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArgumentList {
    pub pos: u32,
    pub end: u32,
    pub items: Vec<NodeIndex>,
}

impl ArgumentList {
    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }
}

/// Node payloads. Child references are `NodeIndex::NONE` when absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum NodeData {
    SourceFile {
        file_name: String,
        statements: Vec<NodeIndex>,
    },

    // Directives and declarations
    IncludeDirective {
        path: NodeIndex,
        system: bool,
    },
    Inherit {
        path: NodeIndex,
    },
    ClassDeclaration {
        modifiers: Vec<NodeIndex>,
        flags: ModifierFlags,
        name: NodeIndex,
        members: Vec<NodeIndex>,
    },
    FunctionDeclaration {
        modifiers: Vec<NodeIndex>,
        flags: ModifierFlags,
        return_type: NodeIndex,
        name: NodeIndex,
        parameters: ArgumentList,
        body: NodeIndex,
    },
    VariableDeclaration {
        modifiers: Vec<NodeIndex>,
        flags: ModifierFlags,
        ty: NodeIndex,
        declarators: Vec<NodeIndex>,
    },
    VariableDeclarator {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    Modifier {
        keyword: SyntaxKind,
    },
    Parameter {
        ty: NodeIndex,
        name: NodeIndex,
        variadic: bool,
    },
    /// `foreach`/`catch` binding: optional type plus a name.
    Binding {
        ty: NodeIndex,
        name: NodeIndex,
    },
    /// A bare `...` marker in a parameter list.
    Ellipsis,

    // Types
    TypeName {
        keyword: SyntaxKind,
        name: String,
        array_depth: u32,
    },
    FunctionType {
        return_type: NodeIndex,
        parameters: Vec<NodeIndex>,
        variadic: bool,
        array_depth: u32,
    },

    // Statements
    Block {
        statements: Vec<NodeIndex>,
    },
    If {
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    },
    While {
        condition: NodeIndex,
        body: NodeIndex,
    },
    Do {
        body: NodeIndex,
        condition: NodeIndex,
    },
    For {
        initializer: NodeIndex,
        condition: NodeIndex,
        incrementor: NodeIndex,
        body: NodeIndex,
    },
    Foreach {
        bindings: Vec<NodeIndex>,
        iterable: NodeIndex,
        body: NodeIndex,
    },
    Switch {
        expression: NodeIndex,
        clauses: Vec<NodeIndex>,
    },
    /// `case label[..range_end]:` or `default:` (label is NONE).
    CaseClause {
        label: NodeIndex,
        range_end: NodeIndex,
        statements: Vec<NodeIndex>,
    },
    Try {
        try_block: NodeIndex,
        catch_binding: NodeIndex,
        catch_block: NodeIndex,
    },
    Return {
        expression: NodeIndex,
    },
    Break,
    Continue,
    ExpressionStatement {
        expression: NodeIndex,
    },
    EmptyStatement,

    // Expressions
    Identifier {
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
    /// Adjacent string literals.
    StringConcat {
        parts: Vec<NodeIndex>,
    },
    Binary {
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    },
    PrefixUnary {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    PostfixUnary {
        operand: NodeIndex,
        operator: SyntaxKind,
    },
    Conditional {
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    },
    Call {
        callee: NodeIndex,
        arguments: ArgumentList,
    },
    MemberAccess {
        expression: NodeIndex,
        name: NodeIndex,
        arrow: bool,
    },
    New {
        target: NodeIndex,
        arguments: Option<ArgumentList>,
    },
    Cast {
        ty: NodeIndex,
        expression: NodeIndex,
    },
    /// `a[i]` or the range form `a[i..j]`.
    Index {
        expression: NodeIndex,
        index: NodeIndex,
        range_end: NodeIndex,
        is_range: bool,
    },
    ArrayLiteral {
        elements: Vec<NodeIndex>,
    },
    MappingLiteral {
        entries: Vec<NodeIndex>,
    },
    MappingEntry {
        key: NodeIndex,
        value: NodeIndex,
    },
    Parenthesized {
        expression: NodeIndex,
    },
    /// `expr...` in an argument list.
    Spread {
        expression: NodeIndex,
    },

    // Sentinels
    Missing {
        message: String,
        expected: Option<ExpectedKind>,
    },
    Wrong {
        message: String,
        expected: Option<ExpectedKind>,
    },
}

/// Fieldless tag of `NodeData`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    SourceFile,
    IncludeDirective,
    Inherit,
    ClassDeclaration,
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    Modifier,
    Parameter,
    Binding,
    Ellipsis,
    TypeName,
    FunctionType,
    Block,
    If,
    While,
    Do,
    For,
    Foreach,
    Switch,
    CaseClause,
    Try,
    Return,
    Break,
    Continue,
    ExpressionStatement,
    EmptyStatement,
    Identifier,
    Literal,
    StringConcat,
    Binary,
    PrefixUnary,
    PostfixUnary,
    Conditional,
    Call,
    MemberAccess,
    New,
    Cast,
    Index,
    ArrayLiteral,
    MappingLiteral,
    MappingEntry,
    Parenthesized,
    Spread,
    Missing,
    Wrong,
}

impl NodeKind {
    #[inline]
    pub fn is_sentinel(self) -> bool {
        matches!(self, NodeKind::Missing | NodeKind::Wrong)
    }

    #[inline]
    pub fn is_type(self) -> bool {
        matches!(self, NodeKind::TypeName | NodeKind::FunctionType)
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::ClassDeclaration
                | NodeKind::FunctionDeclaration
                | NodeKind::VariableDeclaration
        )
    }
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::SourceFile { .. } => NodeKind::SourceFile,
            NodeData::IncludeDirective { .. } => NodeKind::IncludeDirective,
            NodeData::Inherit { .. } => NodeKind::Inherit,
            NodeData::ClassDeclaration { .. } => NodeKind::ClassDeclaration,
            NodeData::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
            NodeData::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            NodeData::VariableDeclarator { .. } => NodeKind::VariableDeclarator,
            NodeData::Modifier { .. } => NodeKind::Modifier,
            NodeData::Parameter { .. } => NodeKind::Parameter,
            NodeData::Binding { .. } => NodeKind::Binding,
            NodeData::Ellipsis => NodeKind::Ellipsis,
            NodeData::TypeName { .. } => NodeKind::TypeName,
            NodeData::FunctionType { .. } => NodeKind::FunctionType,
            NodeData::Block { .. } => NodeKind::Block,
            NodeData::If { .. } => NodeKind::If,
            NodeData::While { .. } => NodeKind::While,
            NodeData::Do { .. } => NodeKind::Do,
            NodeData::For { .. } => NodeKind::For,
            NodeData::Foreach { .. } => NodeKind::Foreach,
            NodeData::Switch { .. } => NodeKind::Switch,
            NodeData::CaseClause { .. } => NodeKind::CaseClause,
            NodeData::Try { .. } => NodeKind::Try,
            NodeData::Return { .. } => NodeKind::Return,
            NodeData::Break => NodeKind::Break,
            NodeData::Continue => NodeKind::Continue,
            NodeData::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            NodeData::EmptyStatement => NodeKind::EmptyStatement,
            NodeData::Identifier { .. } => NodeKind::Identifier,
            NodeData::Literal { .. } => NodeKind::Literal,
            NodeData::StringConcat { .. } => NodeKind::StringConcat,
            NodeData::Binary { .. } => NodeKind::Binary,
            NodeData::PrefixUnary { .. } => NodeKind::PrefixUnary,
            NodeData::PostfixUnary { .. } => NodeKind::PostfixUnary,
            NodeData::Conditional { .. } => NodeKind::Conditional,
            NodeData::Call { .. } => NodeKind::Call,
            NodeData::MemberAccess { .. } => NodeKind::MemberAccess,
            NodeData::New { .. } => NodeKind::New,
            NodeData::Cast { .. } => NodeKind::Cast,
            NodeData::Index { .. } => NodeKind::Index,
            NodeData::ArrayLiteral { .. } => NodeKind::ArrayLiteral,
            NodeData::MappingLiteral { .. } => NodeKind::MappingLiteral,
            NodeData::MappingEntry { .. } => NodeKind::MappingEntry,
            NodeData::Parenthesized { .. } => NodeKind::Parenthesized,
            NodeData::Spread { .. } => NodeKind::Spread,
            NodeData::Missing { .. } => NodeKind::Missing,
            NodeData::Wrong { .. } => NodeKind::Wrong,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub pos: u32,
    pub end: u32,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }
}

/// Flat storage for every node of one parsed file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
