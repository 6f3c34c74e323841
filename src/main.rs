use clap::Parser;
use lsbot::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
