//! Dispatcher CLI Binary
//!
//! Command-line interface for external resource reservations.

use anyhow::Context;
use clap::Parser;
use resource_dispatcher::error::ApiError;
use resource_dispatcher::logging::init_logging;
use resource_dispatcher::tooling::cli::{Cli, CliContext};
use std::process;

/// sysexits EX_IOERR
const EXIT_IO: i32 = 74;
const EXIT_FAILURE: i32 = 1;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.load_config().context("loading configuration")?;
    if let Err(e) = init_logging(&config.logging, &cli.logging_overrides()) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    let context = CliContext::new(&config).context("opening fleet store")?;
    Ok(context.execute(&cli.command)?)
}

/// Process exit status for a failed run
fn exit_code(error: &anyhow::Error) -> i32 {
    let io = error
        .downcast_ref::<ApiError>()
        .map(ApiError::is_io)
        .unwrap_or(false);
    if io {
        EXIT_IO
    } else {
        EXIT_FAILURE
    }
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            let code = exit_code(&e);
            if code == EXIT_IO {
                eprintln!("I/O error: {:#}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            process::exit(code);
        }
    }
}
