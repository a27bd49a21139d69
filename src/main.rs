use clap::Parser;
use stockfeed::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
