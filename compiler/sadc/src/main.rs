//! The executable of the SAD compiler.

use std::process::ExitCode;

use clap::Parser;
use sadc_driver::Arguments;

fn main() -> ExitCode {
    let arguments = Arguments::parse();

    env_logger::Builder::new()
        .filter_level(arguments.log_level())
        .parse_default_env()
        .init();

    sadc_driver::run(&arguments)
}
