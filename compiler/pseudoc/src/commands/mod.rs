//! Command handlers for the `pseudoc` CLI.
//!
//! Each submodule implements one command. The `*_file` entry points print
//! and exit; the functions they wrap return their output so tests can call
//! them directly.

mod check;
mod run;

pub use check::{check_file, check_source, CheckReport};
pub use run::{error_document, parse_run_args, render_run, run_file, RunOptions};
pub use test::run_fixtures;

/// Read an input document, where `-` means stdin. Exits on failure.
pub(crate) fn read_source(path: &str) -> String {
    let read = if path == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    match read {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
