//! # dhash-compare CLI
//!
//! Command-line interface for fingerprinting and comparing images.
//!
//! ## Usage
//! ```bash
//! dhash-compare compare a.jpg b.jpg
//! dhash-compare compare a.jpg b.jpg --output pretty --hash-size 16
//! dhash-compare hash ~/Photos/*.jpg
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::exit_code(cli::run())
}
