//! Contains the [`Type`] of variables and the type [`Reduction`] of
//! expressions.

use std::fmt::Display;

use sadc_lexical::token::Keyword;
use sadc_syntax::tree::NodeID;

use crate::{
    ast::{Ast, Label},
    symbol::Table,
};

/// Enumeration of the types a variable can be declared with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum Type {
    Int,
    String,
    Boolean,
}

impl Type {
    /// Gets the type named by the given keyword, if it names one.
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Int => Some(Self::Int),
            Keyword::String => Some(Self::String),
            Keyword::Boolean => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// The type an expression reduces to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reduction {
    /// Every leaf of the expression has this type.
    Homogeneous(Type),

    /// The leaves of the expression don't agree on a type.
    Mixed,

    /// Some leaf has no type, i.e. it's an undeclared variable. The type
    /// checks of the enclosing statement are skipped.
    Unknown,
}

impl Reduction {
    /// Combines the reductions of two parts of one expression. An unknown
    /// part makes the whole expression unknown.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::Homogeneous(lhs), Self::Homogeneous(rhs)) if lhs == rhs => {
                self
            }
            _ => Self::Mixed,
        }
    }
}

impl Display for Reduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Homogeneous(ty) => write!(f, "`{ty}`"),
            Self::Mixed => f.write_str("a mixed expression"),
            Self::Unknown => f.write_str("an unknown type"),
        }
    }
}

/// Reduces the expression rooted at `node` to a single type.
///
/// A comparison is a boolean leaf; the types of its operands are checked
/// separately. An identifier contributes the declared type of the variable
/// it resolved to, and [`Reduction::Unknown`] if it didn't resolve.
#[must_use]
pub fn reduce(ast: &Ast, node: NodeID<Label>, table: &Table) -> Reduction {
    match ast.label(node) {
        Label::Digit(_) => Reduction::Homogeneous(Type::Int),
        Label::StringLiteral(_) => Reduction::Homogeneous(Type::String),
        Label::Boolean(_) | Label::Equal | Label::NotEqual => {
            Reduction::Homogeneous(Type::Boolean)
        }
        Label::Identifier { symbol: Some(symbol), .. } => {
            Reduction::Homogeneous(table.symbol(*symbol).ty())
        }
        Label::Addition => ast
            .children(node)
            .iter()
            .map(|x| reduce(ast, *x, table))
            .reduce(Reduction::merge)
            .unwrap_or(Reduction::Unknown),
        _ => Reduction::Unknown,
    }
}

#[cfg(test)]
mod test {
    use super::{Reduction, Type};

    #[test]
    fn merge() {
        let int = Reduction::Homogeneous(Type::Int);
        let string = Reduction::Homogeneous(Type::String);

        assert_eq!(int.merge(int), int);
        assert_eq!(int.merge(Reduction::Unknown), Reduction::Unknown);
        assert_eq!(Reduction::Unknown.merge(string), Reduction::Unknown);
        assert_eq!(
            Reduction::Mixed.merge(Reduction::Unknown),
            Reduction::Unknown
        );
        assert_eq!(int.merge(string), Reduction::Mixed);
        assert_eq!(Reduction::Mixed.merge(int), Reduction::Mixed);
        assert_eq!(
            Reduction::Unknown.merge(Reduction::Unknown),
            Reduction::Unknown
        );
    }
}
