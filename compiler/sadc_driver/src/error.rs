//! Contains the [`Error`] enum, which gathers the diagnostics of every stage.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use sadc_diagnostic::{Diagnostic, Report};
use sadc_syntax::error::SyntaxError;

/// A diagnostic reported by any of the compilation stages.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    Lexical(sadc_lexical::error::Error),
    Syntax(SyntaxError),
    Semantic(sadc_semantic::error::Error),
    CodeGeneration(sadc_codegen::Error),
}

impl Error {
    /// Checks whether the diagnostic stops the program from being compiled,
    /// as opposed to a warning.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        match self {
            Self::Lexical(error) => error.is_error(),
            Self::Semantic(error) => error.is_error(),
            Self::Syntax(_) | Self::CodeGeneration(_) => true,
        }
    }
}

impl Report for Error {
    fn report(&self) -> Diagnostic {
        match self {
            Self::Lexical(error) => error.report(),
            Self::Syntax(error) => error.report(),
            Self::Semantic(error) => error.report(),
            Self::CodeGeneration(error) => error.report(),
        }
    }
}
