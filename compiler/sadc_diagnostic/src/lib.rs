//! Contains the definition of the [`Diagnostic`] struct and related types.

use std::fmt::Display;

pub use sadc_log::Severity;
use sadc_log::Message;

/// Implement this trait for a type that can report a diagnostic.
///
/// This trait is typically implemented by structs or enums that encode the
/// error or warning conditions found by one of the compilation stages. Keeping
/// those conditions as plain data instead of formatting them on the spot lets
/// the tests match on them directly.
pub trait Report {
    /// Creates a diagnostic.
    fn report(&self) -> Diagnostic;
}

/// The compilation stage a [`Diagnostic`] originates from.
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
)]
#[allow(missing_docs)]
pub enum Stage {
    #[strum(serialize = "Lexer")]
    Lexer,

    #[strum(serialize = "Parser")]
    Parser,

    #[strum(serialize = "Semantic Analyzer")]
    SemanticAnalyzer,

    #[strum(serialize = "Code Generator")]
    CodeGenerator,
}

/// A struct containing all the information required to display the diagnostic
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_new::new)]
pub struct Diagnostic {
    /// The stage that produced the diagnostic.
    pub stage: Stage,

    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The line in the program the diagnostic points at, if any.
    pub line: Option<usize>,

    /// The message to display to the user.
    pub message: String,

    /// The optional help message to display to the user. This will be
    /// displayed on its own line below the main message.
    #[new(default)]
    pub help_message: Option<String>,
}

impl Diagnostic {
    /// Attaches a help message to the diagnostic.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_message = Some(help.into());
        self
    }

    /// Renders the diagnostic tagged with the number of the program it was
    /// found in.
    #[must_use]
    pub const fn in_program(&self, program: usize) -> InProgram<'_> {
        InProgram { diagnostic: self, program }
    }
}

/// A [`Diagnostic`] tagged with its program number, see
/// [`Diagnostic::in_program`].
#[derive(Debug, Clone, Copy)]
pub struct InProgram<'a> {
    diagnostic: &'a Diagnostic,
    program: usize,
}

impl Display for InProgram<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let diagnostic = self.diagnostic;
        let location = match diagnostic.line {
            Some(line) => format!("program {}, line {line}", self.program),
            None => format!("program {}", self.program),
        };

        write!(
            f,
            "{}",
            Message::new(
                diagnostic.severity,
                format_args!(
                    "{} - {location}: {}",
                    diagnostic.stage, diagnostic.message
                )
            )
        )?;

        if let Some(help) = &diagnostic.help_message {
            write!(f, "\n    = help: {help}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Diagnostic, Severity, Stage};

    #[test]
    fn program_and_line_tagging() {
        sadc_log::set_colored(false);

        let diagnostic = Diagnostic::new(
            Stage::SemanticAnalyzer,
            Severity::Error,
            Some(3),
            "undeclared variable `a`".to_owned(),
        );

        assert_eq!(
            diagnostic.in_program(2).to_string(),
            "[error]: Semantic Analyzer - program 2, line 3: undeclared \
             variable `a`"
        );

        let diagnostic =
            Diagnostic::new(Stage::Lexer, Severity::Warning, None, "x".into())
                .with_help("add `$`");

        assert_eq!(
            diagnostic.in_program(1).to_string(),
            "[warning]: Lexer - program 1: x\n    = help: add `$`"
        );
    }
}
