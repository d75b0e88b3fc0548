//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = convoy_cli::run() {
        eprintln!("convoy: {err}");
        std::process::exit(1);
    }
}
