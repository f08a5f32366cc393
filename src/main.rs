use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use casefile::{CaseRegistry, FAREWELL, GREETING, Settings, parse_input, run_command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Interactive case-management console.
#[derive(Parser, Debug)]
#[command(
    name = "casefile",
    version,
    about = "Record, list and edit cases with a flag-based command grammar"
)]
struct Cli {
    /// Script of commands to run, one per line (default: interactive stdin)
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut registry = CaseRegistry::new();
    let mut settings = Settings::default();

    if let Some(path) = &cli.script {
        let script = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        for line in script.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if handle_line(line, &mut registry, &mut settings) {
                break;
            }
        }
        return Ok(());
    }

    println!("{GREETING}");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            // EOF ends the session like `bye`.
            println!("{FAREWELL}");
            break;
        }
        if handle_line(&line, &mut registry, &mut settings) {
            break;
        }
    }
    Ok(())
}

/// Parse and execute one line; returns true when the session should end.
fn handle_line(line: &str, registry: &mut CaseRegistry, settings: &mut Settings) -> bool {
    match parse_input(line, settings) {
        Ok(command) => match run_command(command, registry, settings) {
            Ok(reply) => {
                println!("{}", reply.text);
                reply.quit
            }
            Err(err) => {
                println!("{err}");
                false
            }
        },
        Err(err) => {
            println!("{err}");
            if let Some(tip) = err.tip() {
                println!("{tip}");
            }
            if let Some(example) = err.example() {
                println!("{example}");
            }
            false
        }
    }
}
