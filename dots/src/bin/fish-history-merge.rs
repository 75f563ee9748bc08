//! Merge two fish history files chronologically.

use clap::Parser;
use clap::error::ErrorKind;
use dots_history::merge_histories;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const USAGE: &str = "Usage: fish-history-merge <local_history> <remote_history> <output_file>";

#[derive(Parser)]
#[command(
    name = "fish-history-merge",
    version,
    about = "Merge two fish history files chronologically"
)]
struct Cli {
    /// History file of this machine
    local_history: PathBuf,
    /// History file pulled from another machine
    remote_history: PathBuf,
    /// Where the merged history is written
    output_file: PathBuf,
}

fn main() -> ExitCode {
    if let Err(err) = dots::init_tracing() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            debug!("invalid arguments: {err}");
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if merge_histories(&cli.local_history, &cli.remote_history, &cli.output_file) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
