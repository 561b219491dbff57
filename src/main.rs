//! gfagraphs CLI
//!
//! A command-line shell around the gfagraphs library.

use gfagraphs::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
