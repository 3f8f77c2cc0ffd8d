//! Converts a gnuplot data file to a 4D JSON array.

use std::process::ExitCode;

use lonely_cli::Mode;

fn main() -> ExitCode {
    lonely_cli::main(Mode::Decode)
}
