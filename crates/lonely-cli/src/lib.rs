//! Shared driver for the `gnuplot-enc` and `gnuplot-dec` binaries.
//!
//! Both binaries read standard input and write standard output. Argument
//! errors are reported before either stream is touched.

use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use lonely::gnuplot::{dump, load, Grid, Spec};
use lonely::SpecError;
use simple_logger::SimpleLogger;
use thiserror::Error;

/// Comment prefix used when decoding.
pub const COMMENT_PREFIX: &str = "#";

/// Axis orders implied by `-z/--zip`.
pub const ZIP_ORDERS: (&str, &str) = ("dblw", "wdbl");

const DEFAULT_ORDER: &str = "dblw";

const LONG_OPTIONS: [&str; 4] = ["--help", "--zip", "--gnu-order", "--json-order"];

/// Which direction a binary converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// JSON on stdin, gnuplot data on stdout.
    Encode,
    /// Gnuplot data on stdin, JSON on stdout.
    Decode,
}

impl Mode {
    fn program(self) -> &'static str {
        match self {
            Mode::Encode => "gnuplot-enc",
            Mode::Decode => "gnuplot-dec",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Mode::Encode => "Converts a 4D JSON array into a gnuplot data file.",
            Mode::Decode => "Converts a gnuplot data file to a 4D JSON array.",
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Spec),
    Help,
}

/// Bad command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unrecognized argument: {0}")]
    UnknownArgument(String),

    #[error("argument {flag}: expected one argument")]
    MissingValue { flag: &'static str },

    #[error("argument -J/--json-order: not allowed with argument -z/--zip")]
    JsonWithZip,

    #[error("-G makes no sense without -J")]
    GnuWithoutJson,

    #[error("{0}")]
    InvalidOrder(#[from] SpecError),
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut gnu: Option<String> = None;
    let mut json: Option<String> = None;
    let mut zip = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if arg == "--" {
            // Everything after `--` is positional, and there are no positionals.
            if let Some(extra) = args.next() {
                return Err(UsageError::UnknownArgument(extra.as_ref().to_string()));
            }
            break;
        }
        let unknown = || UsageError::UnknownArgument(arg.to_string());
        let (flag, attached) = split_flag(arg).ok_or_else(unknown)?;
        match flag {
            "-h" | "--help" if attached.is_none() => return Ok(Command::Help),
            "-z" | "--zip" if attached.is_none() => zip = true,
            "-G" | "--gnu-order" => gnu = Some(option_value(attached, &mut args, "-G/--gnu-order")?),
            "-J" | "--json-order" => json = Some(option_value(attached, &mut args, "-J/--json-order")?),
            _ => return Err(unknown()),
        }
    }

    if zip && json.is_some() {
        return Err(UsageError::JsonWithZip);
    }
    if gnu.is_some() && json.is_none() {
        return Err(UsageError::GnuWithoutJson);
    }

    let (gnu, json) = if zip {
        (ZIP_ORDERS.0.to_string(), ZIP_ORDERS.1.to_string())
    } else {
        let gnu = gnu.unwrap_or_else(|| DEFAULT_ORDER.to_string());
        let json = json.unwrap_or_else(|| gnu.clone());
        (gnu, json)
    };

    let spec = Spec::default()
        .comment(Some(COMMENT_PREFIX))
        .order(&gnu, &json)?;
    Ok(Command::Run(spec))
}

/// Splits an argument into its flag and any attached value.
///
/// Long flags may be abbreviated to any unique prefix and take a value as
/// `--long=value`. `-G` and `-J` take one as `-Xvalue`. Returns `None` for a
/// long flag that matches no option or more than one.
fn split_flag(arg: &str) -> Option<(&str, Option<&str>)> {
    if arg.starts_with("--") {
        let (name, value) = match arg.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (arg, None),
        };
        return expand_long(name).map(|long| (long, value));
    }
    match arg.get(..2) {
        Some(short @ ("-G" | "-J")) if arg.len() > 2 => Some((short, Some(&arg[2..]))),
        _ => Some((arg, None)),
    }
}

fn expand_long(name: &str) -> Option<&'static str> {
    let mut matches = LONG_OPTIONS.into_iter().filter(|long| long.starts_with(name));
    match (matches.next(), matches.next()) {
        (Some(long), None) => Some(long),
        _ => LONG_OPTIONS.into_iter().find(|&long| long == name),
    }
}

fn option_value<I, S>(attached: Option<&str>, args: &mut I, flag: &'static str) -> Result<String, UsageError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    match attached {
        Some(value) => Ok(value.to_string()),
        None => args
            .next()
            .map(|value| value.as_ref().to_string())
            .ok_or(UsageError::MissingValue { flag }),
    }
}

/// Converts `input` to `output` in the given direction.
pub fn run<R: Read, W: Write>(mode: Mode, spec: &Spec, input: R, output: W) -> Result<()> {
    let mut output = BufWriter::new(output);
    match mode {
        Mode::Encode => {
            let data: Grid = serde_json::from_reader(input)
                .context("failed to read a 4D JSON array from standard input")?;
            debug!("encoding {} datasets", data.len());
            dump(&data, &mut output, spec).context("failed to write gnuplot data")?;
        }
        Mode::Decode => {
            let data = load(input, spec).context("failed to read gnuplot data from standard input")?;
            debug!("decoded {} datasets", data.len());
            serde_json::to_writer(&mut output, &data).context("failed to write JSON")?;
            writeln!(output)?;
        }
    }
    output.flush()?;
    Ok(())
}

/// One-line usage summary.
pub fn usage(mode: Mode) -> String {
    format!(
        "usage: {} [-h] [-G GNU_ORDER] [-J JSON_ORDER | -z]",
        mode.program()
    )
}

/// Full help text.
pub fn help(mode: Mode) -> String {
    let (json_role, zip_help, verb) = match mode {
        Mode::Encode => (
            "written to",
            "Equivalent to -Gdblw -Jwdbl (i.e. move the first axis to the back). \
             Generally speaking, converts data from an object-of-arrays ordering \
             to gnuplot's preferred array-of-objects order.",
            "delimits data by",
        ),
        Mode::Decode => (
            "drawn from",
            "Equivalent to -Gdblw -Jwdbl (i.e. move the final axis to the front). \
             Generally speaking, converts data from gnuplot's array-of-objects \
             order to an object-of-arrays ordering.",
            "parses data delimited by",
        ),
    };
    format!(
        "{usage}\n\n\
         {description}\n\n\
         options:\n  \
         -h, --help            show this help message and exit\n  \
         -G, --gnu-order GNU_ORDER\n                        \
         A 4-character string that labels the axes of the gnuplot data file, \
         for use together with '-J' to permute the axes. Default is 'dblw', \
         short for double, blank, line, word.\n  \
         -J, --json-order JSON_ORDER\n                        \
         A 4-character string consisting of the letters from -G, indicating \
         which axis in the file each axis in the array will be {json_role}. \
         Default is 'dblw' (no permutation).\n  \
         -z, --zip             {zip_help}\n\n\
         This script does not care whether the data file holds a matrix, or 2D \
         data, etc. It merely {verb} (index 1) double blank lines, (index 2) \
         single blank lines, (index 3) lines, then (index 4) spaces.\n",
        usage = usage(mode),
        description = mode.description(),
    )
}

fn init_logging() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .context("failed to initialize logging")
}

/// Entry point shared by both binaries.
pub fn main(mode: Mode) -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("warning: {e:#}");
    }

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", usage(mode));
            eprintln!("{}: error: {}", mode.program(), e);
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            print!("{}", help(mode));
            ExitCode::SUCCESS
        }
        Command::Run(spec) => {
            debug!(
                "{} with file order {} and array order {}",
                mode.program(),
                spec.file_order(),
                spec.logical_order()
            );
            match run(mode, &spec, io::stdin().lock(), io::stdout().lock()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e:?}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_for(args: &[&str]) -> Spec {
        match parse_args(args) {
            Ok(Command::Run(spec)) => spec,
            other => panic!("expected a spec, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let spec = spec_for(&[]);
        assert_eq!(spec.file_order().to_string(), "dblw");
        assert_eq!(spec.logical_order().to_string(), "dblw");
        assert_eq!(spec.comment_prefix(), Some("#"));
    }

    #[test]
    fn test_flag_forms() {
        for args in [
            &["-G", "dblw", "-J", "wdbl"][..],
            &["-Gdblw", "-Jwdbl"][..],
            &["--gnu-order", "dblw", "--json-order", "wdbl"][..],
            &["--gnu-order=dblw", "--json-order=wdbl"][..],
            &["--gnu", "dblw", "--json", "wdbl"][..],
            &["--g=dblw", "--js=wdbl"][..],
        ] {
            let spec = spec_for(args);
            assert_eq!(spec.file_order().to_string(), "dblw", "{:?}", args);
            assert_eq!(spec.logical_order().to_string(), "wdbl", "{:?}", args);
        }
    }

    #[test]
    fn test_json_alone() {
        let spec = spec_for(&["-J", "lwdb"]);
        assert_eq!(spec.file_order().to_string(), "dblw");
        assert_eq!(spec.logical_order().to_string(), "lwdb");
    }

    #[test]
    fn test_zip() {
        let spec = spec_for(&["-z"]);
        assert_eq!(spec.file_order().to_string(), "dblw");
        assert_eq!(spec.logical_order().to_string(), "wdbl");
        assert_eq!(spec_for(&["--zip"]), spec);
        assert_eq!(spec_for(&["--zi"]), spec);
        assert_eq!(spec_for(&["--z", "--"]), spec);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(["-h"]), Ok(Command::Help));
        assert_eq!(parse_args(["-G", "dblw", "--help"]), Ok(Command::Help));
        assert_eq!(parse_args(["--he"]), Ok(Command::Help));
        assert!(help(Mode::Decode).contains("parses data delimited by"));
        assert!(help(Mode::Encode).starts_with(&usage(Mode::Encode)));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(parse_args(["-G", "dblw"]), Err(UsageError::GnuWithoutJson));
        assert_eq!(parse_args(["-z", "-J", "wdbl"]), Err(UsageError::JsonWithZip));
        assert_eq!(
            parse_args(["-J"]),
            Err(UsageError::MissingValue {
                flag: "-J/--json-order"
            })
        );
        assert_eq!(
            parse_args(["--frobnicate"]),
            Err(UsageError::UnknownArgument("--frobnicate".to_string()))
        );
        for arg in ["--zipper", "--zip=1", "--help=x", "--gnu-orders=dblw", "-x"] {
            assert_eq!(
                parse_args([arg]),
                Err(UsageError::UnknownArgument(arg.to_string())),
                "{}",
                arg
            );
        }
        assert_eq!(
            parse_args(["--", "-z"]),
            Err(UsageError::UnknownArgument("-z".to_string()))
        );
        assert_eq!(
            parse_args(["--json"]),
            Err(UsageError::MissingValue {
                flag: "-J/--json-order"
            })
        );
        assert!(matches!(
            parse_args(["-G", "dblw", "-J", "dblz"]),
            Err(UsageError::InvalidOrder(SpecError::NotAPermutation { .. }))
        ));
        assert!(matches!(
            parse_args(["-J", "dbaa"]),
            Err(UsageError::InvalidOrder(_))
        ));
    }

    #[test]
    fn test_run_decode() {
        let spec = spec_for(&[]);
        let mut out = Vec::new();
        run(Mode::Decode, &spec, "# x y\n1 2\n3 4\n\n5 6\n".as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[[[[1.0,2.0],[3.0,4.0]],[[5.0,6.0]]]]\n"
        );
    }

    #[test]
    fn test_run_encode() {
        let spec = spec_for(&[]);
        let mut out = Vec::new();
        run(Mode::Encode, &spec, "[[[[1, 2], [3, 4]], [[5, 6]]]]".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.0 2.0\n3.0 4.0\n\n5.0 6.0\n");
    }

    #[test]
    fn test_run_zip_roundtrip() {
        let spec = spec_for(&["-z"]);
        let mut json = Vec::new();
        run(Mode::Decode, &spec, "0 10\n1 11\n".as_bytes(), &mut json).unwrap();
        assert_eq!(
            String::from_utf8(json.clone()).unwrap(),
            "[[[[0.0,1.0]]],[[[10.0,11.0]]]]\n"
        );

        let mut text = Vec::new();
        run(Mode::Encode, &spec, json.as_slice(), &mut text).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "0.0 10.0\n1.0 11.0\n");
    }

    #[test]
    fn test_run_errors() {
        let spec = spec_for(&[]);
        let err = run(Mode::Decode, &spec, "1 x\n".as_bytes(), Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("\"x\""));

        let err = run(Mode::Encode, &spec, "[[1, 2]]".as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("4D JSON array"));
    }
}
