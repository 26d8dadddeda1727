//! Thin binary entry point: the CLI proper lives in `src/cli/`, this
//! file only invokes `cli::run()` and handles process termination.
//! Everything from the `forkfulapp` crate inward is UI agnostic; all
//! argument parsing, dispatch, and rendering happens in the CLI layer.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
