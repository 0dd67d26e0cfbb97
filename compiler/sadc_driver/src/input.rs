//! Contains the functions that read the input and split it into the programs
//! it contains.

use std::path::{Path, PathBuf};

/// The input could not be read.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("{}: {source}", path.display())]
    File {
        /// The path given on the command line.
        path: PathBuf,

        /// The underlying error.
        source: std::io::Error,
    },

    /// The standard input could not be read.
    #[error("<stdin>: {0}")]
    Stdin(#[source] std::io::Error),
}

/// One program of the input, the text up to and including its `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Program<'a> {
    /// The position of the program in the input, starting from 1.
    pub number: usize,

    /// The line of the input the program starts on.
    pub first_line: usize,

    /// The text of the program.
    pub text: &'a str,
}

/// Reads the whole input, from the given file or from the standard input.
///
/// # Errors
///
/// See [`InputError`].
pub fn read(file: Option<&Path>) -> Result<String, InputError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| {
            InputError::File { path: path.to_owned(), source }
        }),
        None => std::io::read_to_string(std::io::stdin())
            .map_err(InputError::Stdin),
    }
}

/// Splits the input into its programs at every `$`.
///
/// Text after the last `$` forms a final program, unless it's blank.
#[must_use]
pub fn split(input: &str) -> Vec<Program<'_>> {
    input
        .split_inclusive('$')
        .scan(1, |line, text| {
            let first_line = *line;
            *line += text.matches('\n').count();

            Some((first_line, text))
        })
        .filter(|(_, text)| !text.trim().is_empty())
        .enumerate()
        .map(|(index, (first_line, text))| Program {
            number: index + 1,
            first_line,
            text,
        })
        .collect()
}

#[cfg(test)]
mod test;
