//! Contains the command line [`Arguments`] of the compiler.

use std::path::PathBuf;

/// The arguments to the program.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser,
)]
#[clap(
    name = "sadc",
    about = "Compiles SAD programs into 256-byte machine images",
    version
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Arguments {
    /// The file containing the programs to compile, separated by `$`. The
    /// programs are read from the standard input if it's not specified.
    pub file: Option<PathBuf>,

    /// Prints the traces of the compilation stages. Repeat to see more.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Prints the concrete syntax tree of every program.
    #[clap(long)]
    pub cst: bool,

    /// Prints the abstract syntax tree of every program.
    #[clap(long)]
    pub ast: bool,

    /// Prints the instructions decoded back from every image.
    #[clap(long)]
    pub disassemble: bool,

    /// Disables the colors of the diagnostics.
    #[clap(long)]
    pub no_color: bool,
}

impl Arguments {
    /// Gets the most detailed level of log records to print.
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use clap::Parser;

    use super::Arguments;

    #[test]
    fn defaults() {
        let arguments = Arguments::parse_from(["sadc"]);

        assert_eq!(arguments.file, None);
        assert_eq!(arguments.log_level(), log::LevelFilter::Warn);
        assert!(!arguments.cst && !arguments.ast && !arguments.disassemble);
    }

    #[test]
    fn flags() {
        let arguments = Arguments::parse_from([
            "sadc",
            "-vv",
            "--cst",
            "--disassemble",
            "--no-color",
            "programs.sad",
        ]);

        assert_eq!(
            arguments.file.as_deref(),
            Some(Path::new("programs.sad"))
        );
        assert_eq!(arguments.log_level(), log::LevelFilter::Debug);
        assert!(arguments.cst && arguments.disassemble && arguments.no_color);
        assert!(!arguments.ast);
    }
}
