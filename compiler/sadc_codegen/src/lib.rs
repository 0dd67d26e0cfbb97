//! This crate turns an analyzed program into the memory image of the target
//! machine.
//!
//! The machine has an accumulator, two index registers and 256 bytes of
//! memory holding the code, the static variables and the string literals at
//! once. See [`generator::generate`] for the entry point and
//! [`instruction::Instruction`] for the instruction set.

use sadc_diagnostic::{Diagnostic, Report, Severity, Stage};

pub mod generator;
pub mod heap;
pub mod image;
pub mod instruction;
pub mod table;

/// The number of bytes of memory of the target machine.
pub const MEMORY_SIZE: usize = 256;

/// The code generator could not produce an image.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
pub enum Error {
    /// The code, the static variables and the string literals of the program
    /// don't fit in memory together.
    #[error(
        "the program needs at least {required} bytes of memory, but only \
         256 are available"
    )]
    OutOfMemory {
        /// The number of bytes the program needs.
        required: usize,
    },
}

impl Report for Error {
    fn report(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::CodeGenerator,
            Severity::Error,
            None,
            self.to_string(),
        )
        .with_help("use fewer variables, shorter strings or smaller loops")
    }
}
