//! erc-finality - Extract ERC finalization dates from git history

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = erc_finality::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
