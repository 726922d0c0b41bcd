use clap::Parser;
use romsum_core::Error;

mod cli;

use crate::cli::Cli;

/// Exit status for a failed run: the core error class if there is one,
/// otherwise the generic failure status.
fn exit_status(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_status)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = cli.run() {
        eprintln!("romsum error: {:#}", err);
        std::process::exit(exit_status(&err));
    }
}
