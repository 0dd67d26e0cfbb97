//! Contains the main [`run()`] function of the compiler, which drives every
//! program of the input through the whole pipeline.

use std::{
    fmt::Display,
    process::ExitCode,
    sync::atomic::{AtomicUsize, Ordering},
};

use getset::Getters;
use sadc_codegen::{
    generator::{self, Output},
    instruction,
};
use sadc_diagnostic::{Report, Severity};
use sadc_handler::Handler;
use sadc_lexical::token::{Category, TokenStream};
use sadc_log::Message;
use sadc_semantic::analyzer::{self, Program};
use sadc_syntax::{error::SyntaxError, parser::Tree};

pub mod argument;
pub mod error;
pub mod input;

pub use argument::Arguments;
pub use error::Error;

/// A [`Handler`] accepting the diagnostics of every compilation stage.
pub trait StageHandler:
    Handler<sadc_lexical::error::Error>
    + Handler<SyntaxError>
    + Handler<sadc_semantic::error::Error>
    + Handler<sadc_codegen::Error>
{
}

impl<T> StageHandler for T where
    T: Handler<sadc_lexical::error::Error>
        + Handler<SyntaxError>
        + Handler<sadc_semantic::error::Error>
        + Handler<sadc_codegen::Error>
{
}

/// Everything the pipeline produced for one program.
///
/// The pipeline stops at the first stage that fails, so the products of the
/// later stages are missing.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Compilation {
    /// The tokens of the program.
    #[get = "pub"]
    tokens: TokenStream,

    /// The concrete syntax tree, if the tokens are grammatical.
    #[get = "pub"]
    cst: Option<Tree>,

    /// The abstract syntax tree and the symbol table, if the program is well
    /// scoped and well typed.
    #[get = "pub"]
    program: Option<Program>,

    /// The generated image, if it fits in memory.
    #[get = "pub"]
    output: Option<Output>,
}

impl Compilation {
    /// Checks whether the program made it through every stage.
    #[must_use]
    pub const fn is_success(&self) -> bool { self.output.is_some() }
}

/// Compiles the text of one program, reporting the diagnostics of every
/// stage to `handler`.
///
/// `first_line` is the line of the input the text starts on.
pub fn compile<H: StageHandler>(
    source: &str,
    first_line: usize,
    handler: &H,
) -> Compilation {
    let tokens = TokenStream::tokenize(source, first_line, handler);
    let mut compilation =
        Compilation { tokens, cst: None, program: None, output: None };

    if compilation.tokens.iter().any(|x| x.category == Category::Error) {
        log::info!("driver: stopping after the lexer");
        return compilation;
    }

    compilation.cst =
        sadc_syntax::parser::parse(&compilation.tokens, handler).ok();
    if compilation.cst.is_none() {
        log::info!("driver: stopping after the parser");
        return compilation;
    }

    compilation.program = analyzer::analyze(&compilation.tokens, handler).ok();
    let Some(program) = &compilation.program else {
        log::info!("driver: stopping after the semantic analyzer");
        return compilation;
    };

    match generator::generate(program.ast(), program.table()) {
        Ok(output) => compilation.output = Some(output),
        Err(error) => Handler::<sadc_codegen::Error>::receive(handler, error),
    }

    compilation
}

/// A struct that implements [`Handler`] by printing every diagnostic to the
/// standard error stream, tagged with the number of the program.
#[derive(Debug)]
struct Printer {
    program: usize,
    errors: AtomicUsize,
}

impl Printer {
    const fn new(program: usize) -> Self {
        Self { program, errors: AtomicUsize::new(0) }
    }

    fn errors(&self) -> usize { self.errors.load(Ordering::Relaxed) }
}

impl<E: Report> Handler<E> for Printer {
    fn receive(&self, error: E) {
        let diagnostic = error.report();

        if diagnostic.severity == Severity::Error {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }

        eprintln!("{}", diagnostic.in_program(self.program));
    }
}

/// The products of a compilation the user asked for, displayed in pipeline
/// order.
#[derive(Debug, Clone, Copy)]
struct Rendering<'a> {
    compilation: &'a Compilation,
    arguments: &'a Arguments,
}

impl Display for Rendering<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.arguments.cst {
            if let Some(cst) = self.compilation.cst() {
                writeln!(f, "Concrete syntax tree:\n{}", cst.render())?;
            }
        }

        let Some(program) = self.compilation.program() else {
            return Ok(());
        };

        if self.arguments.ast {
            writeln!(f, "Abstract syntax tree:\n{}", program.ast().render())?;
        }

        writeln!(f, "Symbol table:\n{}\n", program.table())?;

        let Some(output) = self.compilation.output() else {
            return Ok(());
        };

        writeln!(f, "Variable table:\n{}\n", output.variables())?;
        writeln!(f, "Jump table:\n{}\n", output.jumps())?;

        if self.arguments.disassemble {
            writeln!(f, "Disassembly:")?;

            match instruction::disassemble(output.image()) {
                Ok(instructions) => {
                    for (offset, instruction) in instructions {
                        writeln!(f, "{offset:02X}: {instruction}")?;
                    }
                }
                Err(error) => {
                    log::warn!("driver: can't disassemble the image: {error}");
                }
            }

            writeln!(f)?;
        }

        writeln!(f, "Image:\n{}", output.image())
    }
}

/// Renders the products of a compilation the user asked for.
#[must_use]
pub fn render(compilation: &Compilation, arguments: &Arguments) -> String {
    Rendering { compilation, arguments }.to_string()
}

/// Runs the compiler with the given arguments.
#[must_use]
pub fn run(arguments: &Arguments) -> ExitCode {
    if arguments.no_color {
        sadc_log::set_colored(false);
    }

    let source = match input::read(arguments.file.as_deref()) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", Message::new(Severity::Error, error));
            return ExitCode::FAILURE;
        }
    };

    let programs = input::split(&source);
    if programs.is_empty() {
        let message = Message::new(Severity::Warning, "no program to compile");
        eprintln!("{message}");
        return ExitCode::SUCCESS;
    }

    let mut failed = 0;

    for program in &programs {
        log::info!(
            "driver: compiling program {} from line {}",
            program.number,
            program.first_line
        );
        println!(
            "{}",
            Message::new(
                Severity::Info,
                format_args!("compiling program {}", program.number)
            )
        );

        let printer = Printer::new(program.number);
        let compilation = compile(program.text, program.first_line, &printer);

        print!("{}", render(&compilation, arguments));

        if compilation.is_success() {
            println!(
                "{}\n",
                Message::new(
                    Severity::Info,
                    format_args!("program {} compiled", program.number)
                )
            );
        } else {
            failed += 1;
            println!(
                "{}\n",
                Message::new(
                    Severity::Error,
                    format_args!(
                        "program {} failed with {} error(s)",
                        program.number,
                        printer.errors()
                    )
                )
            );
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
