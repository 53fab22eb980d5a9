//! Binary entrypoint for the `lorekeep` CLI.

use std::process::ExitCode;

use lorekeep::LoreError;

fn main() -> ExitCode {
    // A missing .env is normal; LOREKEEP_CONFIG and RUST_LOG may come from it.
    let _ = dotenvy::dotenv();

    match lorekeep::run(std::env::args_os()) {
        Ok(outcome) => outcome.into(),
        Err(LoreError::Usage(message)) => {
            eprint!("{message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
