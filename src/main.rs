use std::process::ExitCode;

use clap::Parser;
use mdloc::cli::{Arguments, ExitStatus, init_logger, run_cli};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logger(args.verbose());

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
