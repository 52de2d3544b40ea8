use sumcheck_core::logging;

mod cli;

use crate::cli::{Cli, UsageError};

fn main() {
    // Logs go to the state dir; fall back to stderr so stdout stays clean.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = match cli::parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(UsageError::Clap(err)) => err.exit(),
        Err(err) => {
            println!("{}", err);
            println!("{}", Cli::usage());
            std::process::exit(1);
        }
    };

    if let Err(err) = cli.run() {
        eprintln!("sumcheck error: {:#}", err);
        std::process::exit(1);
    }
}
