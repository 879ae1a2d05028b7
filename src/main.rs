//! artplotter - release signed, numbered editions of generative art on a pen plotter

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = artplotter::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
