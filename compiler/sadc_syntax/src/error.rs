//! Contains the [`SyntaxError`] reported by the parser.

use std::fmt::Display;

use sadc_diagnostic::{Diagnostic, Report, Severity, Stage};
use sadc_lexical::token::{Category, Token};

/// Enumeration of what the parser may have been looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expected {
    /// A token of exactly this category.
    Category(Category),

    /// The start of an expression: a digit, `"`, `(`, a boolean literal or
    /// an identifier.
    Expression,

    /// `(` or a boolean literal.
    BooleanExpression,

    /// `==` or `!=`.
    BooleanOperator,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Expression => f.write_str("an expression"),
            Self::BooleanExpression => f.write_str("a boolean expression"),
            Self::BooleanOperator => f.write_str("`==` or `!=`"),
        }
    }
}

/// The token stream is not derivable from the grammar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyntaxError {
    /// What the parser was looking for.
    pub expected: Expected,

    /// The token found instead, [`None`] if the stream ran out.
    pub found: Option<Token>,
}

fn found_string(found: Option<&Token>) -> String {
    let Some(token) = found else {
        return "end of input".to_owned();
    };

    match token.category {
        Category::Identifier
        | Category::Digit
        | Category::Character
        | Category::Error => {
            format!("{} `{}`", token.category, token.lexeme)
        }
        category => category.to_string(),
    }
}

impl Report for SyntaxError {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::Parser,
            Severity::Error,
            self.found.as_ref().map(|x| x.line),
            format!(
                "expected {}, found {}",
                self.expected,
                found_string(self.found.as_ref())
            ),
        )
    }
}
