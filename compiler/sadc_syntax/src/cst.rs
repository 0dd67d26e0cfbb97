//! Contains the [`Label`] of the concrete syntax tree.

use std::fmt::Display;

/// The label of a node in the concrete syntax tree.
///
/// Every non-terminal of the grammar has its own case; the tokens the parser
/// consumed are [`Label::Terminal`] leaves holding their lexeme.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::IntoStaticStr,
)]
#[allow(missing_docs)]
pub enum Label {
    Program,
    Block,
    StatementList,
    Statement,
    PrintStatement,
    AssignStatement,
    VarDecl,
    WhileStatement,
    IfStatement,
    Expression,
    IntExpression,
    StringExpression,
    BooleanExpression,
    Identifier,
    CharList,
    Type,
    Char,
    Space,
    Digit,
    BooleanOperator,
    BooleanValue,
    IntOperator,

    /// A consumed token.
    Terminal(String),
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal(lexeme) => write!(f, "[{lexeme}]"),
            non_terminal => {
                write!(f, "<{}>", <&'static str>::from(non_terminal))
            }
        }
    }
}
