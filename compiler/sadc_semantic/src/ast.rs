//! Contains the [`Label`] of the abstract syntax tree.

use std::fmt::Display;

use sadc_syntax::tree::{NodeID, SyntaxTree};

use crate::{
    symbol::{ScopeID, SymbolID},
    ty::Type,
};

/// The abstract syntax tree of one program.
pub type Ast = SyntaxTree<Label>;

/// The label of a node in the abstract syntax tree.
///
/// The children of each kind of node are:
///
/// - [`Label::Program`]: the outermost [`Label::Block`].
/// - [`Label::Block`]: its statements, in order.
/// - [`Label::PrintStatement`]: the printed expression.
/// - [`Label::AssignStatement`]: the target [`Label::Identifier`], then the
///   assigned expression.
/// - [`Label::VarDecl`]: a [`Label::Type`], then the declared
///   [`Label::Identifier`].
/// - [`Label::WhileStatement`] and [`Label::IfStatement`]: the condition, then
///   the guarded [`Label::Block`].
/// - [`Label::Addition`]: a [`Label::Digit`], then the rest of the sum.
/// - [`Label::Equal`] and [`Label::NotEqual`]: both operands.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Label {
    Program,
    Block {
        /// The scope the block opened.
        scope: ScopeID,
    },
    PrintStatement,
    AssignStatement,
    VarDecl,
    WhileStatement,
    IfStatement,
    Addition,
    Equal,
    NotEqual,
    Identifier {
        name: char,

        /// The variable the name resolved to, [`None`] if it wasn't
        /// declared.
        symbol: Option<SymbolID>,
    },
    Digit(u8),
    StringLiteral(String),
    Boolean(bool),
    Type(Type),
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Program => f.write_str("<Program>"),
            Self::Block { .. } => f.write_str("<Block>"),
            Self::PrintStatement => f.write_str("<PrintStatement>"),
            Self::AssignStatement => f.write_str("<AssignStatement>"),
            Self::VarDecl => f.write_str("<VarDecl>"),
            Self::WhileStatement => f.write_str("<WhileStatement>"),
            Self::IfStatement => f.write_str("<IfStatement>"),
            Self::Addition => f.write_str("<Addition>"),
            Self::Equal => f.write_str("<Equal>"),
            Self::NotEqual => f.write_str("<NotEqual>"),
            Self::Identifier { name, .. } => write!(f, "[{name}]"),
            Self::Digit(digit) => write!(f, "[{digit}]"),
            Self::StringLiteral(string) => write!(f, "[\"{string}\"]"),
            Self::Boolean(boolean) => write!(f, "[{boolean}]"),
            Self::Type(ty) => write!(f, "[{ty}]"),
        }
    }
}

/// Renders the expression rooted at `node` back into source text.
#[must_use]
pub fn source_text(ast: &Ast, node: NodeID<Label>) -> String {
    let operand = |index: usize| {
        ast.children(node)
            .get(index)
            .map(|x| source_text(ast, *x))
            .unwrap_or_default()
    };

    match ast.label(node) {
        Label::Addition => format!("{} + {}", operand(0), operand(1)),
        Label::Equal => format!("({} == {})", operand(0), operand(1)),
        Label::NotEqual => format!("({} != {})", operand(0), operand(1)),
        Label::StringLiteral(string) => format!("\"{string}\""),
        Label::Identifier { name, .. } => name.to_string(),
        Label::Digit(digit) => digit.to_string(),
        Label::Boolean(boolean) => boolean.to_string(),
        Label::Type(ty) => ty.to_string(),
        Label::Program
        | Label::Block { .. }
        | Label::PrintStatement
        | Label::AssignStatement
        | Label::VarDecl
        | Label::WhileStatement
        | Label::IfStatement => String::new(),
    }
}
