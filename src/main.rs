//! Binary entry point: parse one path argument, solve, report as JSON.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod command_line;

use command_line::cli::{run, Cli};

fn main() {
    // Log output must not pollute stdout; the JSON report owns it.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::try_parse().unwrap_or_else(|err| {
        use clap::error::ErrorKind;
        if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            err.exit();
        }
        eprint!("{err}");
        std::process::exit(1);
    });

    if let Err(err) = run(&cli) {
        eprintln!("Error occurred: {err}");
        std::process::exit(1);
    }
}
