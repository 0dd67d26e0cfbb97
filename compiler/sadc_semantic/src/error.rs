//! Contains all kinds of semantic errors and warnings.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use sadc_diagnostic::{Diagnostic, Report, Severity, Stage};

use crate::ty::{Reduction, Type};

/// A variable is declared twice in the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RedeclaredVariable {
    /// The name of the variable.
    pub name: char,

    /// The line of the second declaration.
    pub line: usize,

    /// The line of the declaration already in scope.
    pub previous_line: usize,
}

impl Report for RedeclaredVariable {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Error,
            Some(self.line),
            format!(
                "variable `{}` is already declared in this scope on line {}",
                self.name, self.previous_line
            ),
        )
    }
}

/// A name is used without any enclosing declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UndeclaredVariable {
    /// The name that failed to resolve.
    pub name: char,

    /// The line of the use.
    pub line: usize,
}

impl Report for UndeclaredVariable {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Error,
            Some(self.line),
            format!("undeclared variable `{}`", self.name),
        )
    }
}

/// The two sides of an assignment or a comparison don't have the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeMismatch {
    /// The variable being assigned, [`None`] for a comparison.
    pub target: Option<char>,

    /// The declared type of the target, or the type of the left operand.
    pub expected: Reduction,

    /// The type of the assigned expression, or of the right operand.
    pub found: Reduction,

    /// The line of the assignment or of the comparison operator.
    pub line: usize,
}

impl Report for TypeMismatch {
    fn report(&self) -> Diagnostic {
        let message = match self.target {
            Some(name) => format!(
                "type mismatch: cannot assign {} to `{name}` of type {}",
                self.found, self.expected
            ),
            None => format!(
                "type mismatch: cannot compare {} with {}",
                self.expected, self.found
            ),
        };

        let diagnostic = Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Error,
            Some(self.line),
            message,
        );

        if self.target.is_some() && self.found == Reduction::Mixed {
            diagnostic.with_help(format!(
                "only a variable of type `{}` can hold a mixed expression",
                Type::String
            ))
        } else {
            diagnostic
        }
    }
}

/// A variable goes out of scope without ever being assigned.
///
/// Only the first such variable of each scope is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnassignedVariable {
    /// The name of the variable.
    pub name: char,

    /// The line of the declaration.
    pub line: usize,
}

impl Report for UnassignedVariable {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Warning,
            Some(self.line),
            format!("variable `{}` is declared but never assigned", self.name),
        )
    }
}

/// A variable goes out of scope without ever being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnusedVariable {
    /// The name of the variable.
    pub name: char,

    /// The line of the declaration.
    pub line: usize,
}

impl Report for UnusedVariable {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Warning,
            Some(self.line),
            format!("variable `{}` is declared but never used", self.name),
        )
    }
}

/// A variable is read before any value was assigned to it.
///
/// Declared variables start out as zero, so this is only advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UninitializedUse {
    /// The name of the variable.
    pub name: char,

    /// The line of the read.
    pub line: usize,
}

impl Report for UninitializedUse {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Warning,
            Some(self.line),
            format!("variable `{}` is used before being assigned", self.name),
        )
        .with_help("it holds its default value of zero")
    }
}

/// An enumeration of all kinds of semantic diagnostics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From,
)]
#[allow(missing_docs)]
pub enum Error {
    RedeclaredVariable(RedeclaredVariable),
    UndeclaredVariable(UndeclaredVariable),
    TypeMismatch(TypeMismatch),
    UnassignedVariable(UnassignedVariable),
    UnusedVariable(UnusedVariable),
    UninitializedUse(UninitializedUse),
}

impl Error {
    /// Checks whether the diagnostic prevents the program from being
    /// generated.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::RedeclaredVariable(..)
                | Self::UndeclaredVariable(..)
                | Self::TypeMismatch(..)
        )
    }
}

impl Report for Error {
    fn report(&self) -> Diagnostic {
        match self {
            Self::RedeclaredVariable(error) => error.report(),
            Self::UndeclaredVariable(error) => error.report(),
            Self::TypeMismatch(error) => error.report(),
            Self::UnassignedVariable(error) => error.report(),
            Self::UnusedVariable(error) => error.report(),
            Self::UninitializedUse(error) => error.report(),
        }
    }
}
