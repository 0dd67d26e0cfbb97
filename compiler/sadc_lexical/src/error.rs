//! Contains all kinds of lexical errors and warnings that can occur while
//! tokenizing a program.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use sadc_diagnostic::{Diagnostic, Report, Severity, Stage};

/// The source code contains a character sequence that matches no token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnrecognizedToken {
    /// The offending text.
    pub lexeme: String,

    /// The line the text was found on.
    pub line: usize,

    /// The column the text starts at.
    pub column: usize,
}

impl Report for UnrecognizedToken {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::Lexer,
            Severity::Error,
            Some(self.line),
            format!(
                "unrecognized token `{}` at column {}",
                self.lexeme.escape_debug(),
                self.column
            ),
        )
    }
}

/// A string literal contains a character other than a lowercase letter or a
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IllegalStringCharacter {
    /// The offending character.
    pub character: char,

    /// The line the character was found on.
    pub line: usize,

    /// The column of the character.
    pub column: usize,
}

impl Report for IllegalStringCharacter {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::Lexer,
            Severity::Error,
            Some(self.line),
            format!(
                "illegal character `{}` in string literal at column {}",
                self.character.escape_debug(),
                self.column
            ),
        )
        .with_help("strings may only contain lowercase letters and spaces")
    }
}

/// Enumeration of the constructs that must be closed by a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminator {
    /// The program wasn't ended with `$`.
    EndOfProgram,

    /// A string literal wasn't closed with `"`.
    Quote,

    /// A comment wasn't closed with `*/`.
    Comment,
}

/// A construct reached the end of the program without its terminator.
///
/// This is a warning: the tokenizer behaves as if the terminator had been
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingTerminator {
    /// What is missing.
    pub terminator: Terminator,

    /// The line where the unterminated construct started.
    pub line: usize,
}

impl Report for MissingTerminator {
    fn report(&self) -> Diagnostic {
        let (message, help) = match self.terminator {
            Terminator::EndOfProgram => {
                ("program is missing its end marker", "add `$` at the end")
            }
            Terminator::Quote => {
                ("string literal is never closed", "add a closing `\"`")
            }
            Terminator::Comment => {
                ("comment is never closed", "add a closing `*/`")
            }
        };

        Diagnostic::new(
            Stage::Lexer,
            Severity::Warning,
            Some(self.line),
            message.to_owned(),
        )
        .with_help(help)
    }
}

/// An enumeration of all kinds of lexical diagnostics.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From,
)]
#[allow(missing_docs)]
pub enum Error {
    UnrecognizedToken(UnrecognizedToken),
    IllegalStringCharacter(IllegalStringCharacter),
    MissingTerminator(MissingTerminator),
}

impl Error {
    /// Checks whether the diagnostic prevents the program from being parsed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::MissingTerminator(..))
    }
}

impl Report for Error {
    fn report(&self) -> Diagnostic {
        match self {
            Self::UnrecognizedToken(error) => error.report(),
            Self::IllegalStringCharacter(error) => error.report(),
            Self::MissingTerminator(error) => error.report(),
        }
    }
}
