//! `quintuple`: check, run and export DFA definitions from the command line.
//!
//! Definitions are JSON files in the wire format of [`quintuple::Definition`]. Words are comma
//! delimited symbols, the empty string is the empty word.

mod commands;
mod config;
mod exit_codes;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{LogFormat, RunOptions, Settings};

#[derive(Parser)]
#[command(
    name = "quintuple",
    version,
    about = "Validate and simulate deterministic finite automata"
)]
struct Cli {
    /// Log filter directive, overrides `RUST_LOG` (e.g. `quintuple=trace`).
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a definition and print its 5-tuple.
    Check {
        /// Definition file (JSON).
        file: PathBuf,
    },
    /// Decide acceptance for each word. Reads one word per line from stdin when none are given.
    Run {
        /// Definition file (JSON).
        file: PathBuf,
        /// Comma delimited words, e.g. `0,1,1`. Put words starting with `-` after `--`.
        words: Vec<String>,
        /// Print every transition taken.
        #[arg(short, long)]
        trace: bool,
        /// Print nothing, report through the exit code only.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the validated definition as normalised JSON.
    Export {
        /// Definition file (JSON).
        file: PathBuf,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            log_filter: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match logging::init(&cli.settings()).and_then(|()| run(cli)) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match cli.command {
        Command::Check { file } => commands::check(&file, &mut out)?,
        Command::Export { file } => commands::export(&file, &mut out)?,
        Command::Run {
            file,
            words,
            trace,
            quiet,
        } => {
            let options = RunOptions { trace, quiet };
            commands::run(&file, &words, options, io::stdin().lock(), &mut out)?
        }
    };
    out.flush()?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["quintuple", "check", "dfa.json"]);
        assert!(matches!(
            cli.command,
            Command::Check { ref file } if file == &PathBuf::from("dfa.json")
        ));
        assert_eq!(cli.settings(), Settings::default());
    }

    #[test]
    fn parse_run() {
        let cli = Cli::parse_from(["quintuple", "run", "dfa.json", "0,1", "", "--trace"]);
        match cli.command {
            Command::Run { words, trace, quiet, .. } => {
                assert_eq!(words, ["0,1", ""]);
                assert!(trace);
                assert!(!quiet);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn parse_global_logging_flags() {
        let cli = Cli::parse_from([
            "quintuple",
            "export",
            "dfa.json",
            "--log-level",
            "quintuple=debug",
            "--log-format",
            "json",
        ]);
        let settings = cli.settings();
        assert_eq!(settings.log_filter.as_deref(), Some("quintuple=debug"));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn parse_requires_command() {
        assert!(Cli::try_parse_from(["quintuple"]).is_err());
    }
}
