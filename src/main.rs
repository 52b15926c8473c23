use clap::Parser;
use std::process::ExitCode;

use ombscan::cli::{Cli, handle_parse_error};

fn main() -> ExitCode {
    match Cli::try_parse() {
        Ok(cli) => cli.run(),
        Err(err) => handle_parse_error(err),
    }
}
