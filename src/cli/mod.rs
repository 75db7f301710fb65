// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{default_output_path, CliArgs, ABOUT};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::process;

/// Exit status when the input file argument is missing
pub const USAGE_EXIT_CODE: i32 = -1;

/// Usage text printed when no input file is given
pub fn usage() -> String {
    format!("{}\n{}\n", CliArgs::command().render_usage(), ABOUT)
}

/// Parse command-line arguments using clap
///
/// A missing input file prints the usage to stdout and exits with status -1.
/// Other parse failures, `--help` and `--version` are handled by clap itself.
pub fn parse_args() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{}", usage());
            process::exit(USAGE_EXIT_CODE);
        }
        Err(e) => e.exit(),
    }
}
