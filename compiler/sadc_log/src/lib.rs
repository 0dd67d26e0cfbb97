//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use colored::Colorize;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Gets the lowercase name of the severity as printed in the message
    /// header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A message paired with a [`Severity`], printed with a colored
/// `[severity]:` header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_new::new,
)]
pub struct Message<T> {
    /// The severity of the message.
    pub severity: Severity,

    /// The content of the message.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = format!("[{}]:", self.severity.as_str());
        let header = match self.severity {
            Severity::Error => header.bright_red().bold(),
            Severity::Warning => header.bright_yellow().bold(),
            Severity::Info => header.bright_green().bold(),
        };

        write!(f, "{header} {}", self.display.to_string().bold())
    }
}

/// Turns the ANSI coloring of every [`Message`] on or off, regardless of
/// whether the output stream is a terminal.
pub fn set_colored(enabled: bool) { colored::control::set_override(enabled); }

#[cfg(test)]
mod test {
    use super::{set_colored, Message, Severity};

    #[test]
    fn uncolored_message() {
        set_colored(false);

        assert_eq!(
            Message::new(Severity::Warning, "careful").to_string(),
            "[warning]: careful"
        );
        assert_eq!(
            Message::new(Severity::Error, 42).to_string(),
            "[error]: 42"
        );
    }
}
