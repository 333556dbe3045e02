//! Dirac matrices calculator command-line tool.
//!
//! Grounded on `App.{hpp,cpp}`: dispatches to a one-shot expression
//! evaluation when `-e` is given, otherwise starts the interactive REPL.

use clap::Parser;
use dirac_algebra::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    let (settings, expr) = cli.into_settings();

    match expr {
        Some(expr) => match cli::compute(&settings, &expr, &mut std::io::stdout()) {
            Ok(code) => std::process::exit(code),
            Err(e) => {
                eprintln!("I/O error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            if let Err(e) = cli::run_shell(settings) {
                eprintln!("I/O error: {e}");
                std::process::exit(1);
            }
        }
    }
}
