//! The `rolodex` binary is intentionally thin: argument parsing, dispatch,
//! and rendering live in `src/cli.rs`, while this file only invokes
//! `cli::run()` and handles process termination. Everything from
//! `rolodexapp::api` inward is UI agnostic.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
