//! Render filtered tool configs for chezmoi merge scripts.

use anyhow::{Context, Result};
use clap::Parser;
use dots::errors::display_user_error;
use dots_render::{Tool, parse_bool, render_path, sha256_hex};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for an unparseable `is_work` argument
const INVALID_BOOL_EXIT: u8 = 2;

#[derive(Parser)]
#[command(
    name = "render-tool-config",
    version,
    about = "Render filtered tool configs for chezmoi merge scripts."
)]
struct Cli {
    /// Tool the config belongs to (codex | opencode)
    tool: String,
    /// Render for a work machine (true/false)
    is_work: String,
    /// Config source file
    path: PathBuf,
    /// Print the sha256 of the rendered output instead of the output
    #[arg(long)]
    hash_only: bool,
}

fn main() -> ExitCode {
    if let Err(err) = dots::init_tracing() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let cli = Cli::parse();

    let is_work = match parse_bool(&cli.is_work) {
        Ok(is_work) => is_work,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(INVALID_BOOL_EXIT);
        }
    };

    match run(&cli, is_work) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error("render failed", &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, is_work: bool) -> Result<()> {
    let tool: Tool = cli.tool.parse()?;
    let rendered = render_path(tool, is_work, &cli.path)?;

    let output = if cli.hash_only {
        format!("{}\n", sha256_hex(rendered.trim_end_matches('\n')))
    } else {
        rendered
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write rendered config")?;
    stdout.flush().context("failed to flush stdout")
}
