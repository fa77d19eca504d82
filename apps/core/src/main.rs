//! Classnote CLI entry point.
//!
//! Interprets the command given on the command line, or one command per
//! stdin line, and prints each interpretation as JSON.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use classnote_core::{CommandInterpreter, InterpreterConfig, Roster};

/// Message shown when a command yields no actions.
const NOTHING_PARSED: &str = "명령을 인식하지 못했습니다";

#[derive(Debug, Parser)]
#[command(name = "classnote", version, about = "Interpret Korean teacher commands")]
struct Cli {
    /// Command text. Reads one command per stdin line when omitted.
    command: Vec<String>,

    /// Anchor date for relative expressions (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// JSON roster used to attach student ids
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "CLASSNOTE_LOG", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print interpretations
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let config = InterpreterConfig::from_env().context("Invalid CLASSNOTE_* configuration")?;
    let anchor = cli
        .today
        .or(config.today)
        .unwrap_or_else(|| Local::now().date_naive());
    let roster_path = cli.roster.clone().or_else(|| config.roster_path.clone());

    let mut interpreter = CommandInterpreter::with_config(config);
    if let Some(path) = roster_path {
        let roster =
            Roster::load(&path).with_context(|| format!("Failed to load roster {:?}", path))?;
        interpreter = interpreter.with_roster(roster);
    }

    info!("Interpreting against anchor date {}", anchor);

    if cli.command.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            emit(&interpreter, &line, anchor, cli.pretty)?;
        }
    } else {
        emit(&interpreter, &cli.command.join(" "), anchor, cli.pretty)?;
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn emit(
    interpreter: &CommandInterpreter,
    command: &str,
    anchor: NaiveDate,
    pretty: bool,
) -> Result<()> {
    let interpretation = interpreter.interpret(command, anchor);
    if interpretation.is_empty() {
        eprintln!("{}: {}", NOTHING_PARSED, command);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&interpretation)?
    } else {
        serde_json::to_string(&interpretation)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_info() {
        let cli = temp_env::with_var_unset("CLASSNOTE_LOG", || {
            Cli::try_parse_from(["classnote", "학년 회의"]).expect("Arguments should parse")
        });
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.command, vec!["학년 회의".to_string()]);
    }

    #[test]
    fn test_log_level_from_env() {
        let cli = temp_env::with_var("CLASSNOTE_LOG", Some("debug"), || {
            Cli::try_parse_from(["classnote"]).expect("Arguments should parse")
        });
        assert_eq!(cli.log_level, "debug");
    }
}
