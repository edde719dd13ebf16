//! pdfseek - search PDF documents for a regex pattern
//!
//! pdfseek resolves an order-independent command line into a search intent,
//! extracts each document's text through an external extractor, and shows the
//! aggregated match report in a pager (or writes it to a file / stdout).

use std::process::ExitCode;

mod backends;
mod cli;
mod core;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} Exiting now!", err);
            ExitCode::FAILURE
        }
    }
}
