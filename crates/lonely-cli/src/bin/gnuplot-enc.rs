//! Converts a 4D JSON array into a gnuplot data file.

use std::process::ExitCode;

use lonely_cli::Mode;

fn main() -> ExitCode {
    lonely_cli::main(Mode::Encode)
}
