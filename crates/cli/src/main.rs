mod cli;
mod commands;
mod config;

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::commands::ScheduleEdits;
use crate::config::CliConfig;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    tempo_core::config::load_dotenv();

    // Load config
    let cli_config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    let mut config = cli_config.editor_config();
    config.log_summary();
    let pretty = args.pretty || cli_config.pretty;

    match args.command {
        Command::New => {
            let value = commands::new_expression(&config)?;
            println!("{}", commands::output_json(&value, pretty)?);
        }
        Command::Show { value } => {
            let raw = read_value(value)?;
            print!("{}", commands::show(&raw, &config)?);
        }
        Command::Format { value } => {
            let raw = read_value(value)?;
            let formatted = commands::format(&raw, &config)?;
            println!("{}", commands::output_json(&formatted, pretty)?);
        }
        Command::Validate { value, strict } => {
            config.strict_not_arity |= strict;
            let raw = read_value(value)?;
            let result = commands::validate(&raw, &config);
            let report = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{report}");
            if !result.valid {
                info!(errors = result.errors.len(), "validation failed");
                std::process::exit(1);
            }
        }
        Command::Edit { value, ops } => {
            let raw = read_value(value)?;
            let edited = commands::edit(&raw, &ops, &config)?;
            println!("{}", commands::output_json(&edited, pretty)?);
        }
        Command::Schedule {
            value,
            repeats,
            add_segments,
            remove_segments,
            repeat_on,
        } => {
            let raw = read_value(value)?;
            let edits = ScheduleEdits {
                repeats,
                add_segments,
                remove_segments,
                repeat_on,
            };
            let scheduled = commands::schedule(&raw, &edits, &config)?;
            println!("{}", commands::output_json(&scheduled, pretty)?);
        }
    }

    Ok(())
}

/// The VALUE argument, or stdin when it is omitted or `-`.
/// An interactive terminal with no argument yields an empty value.
fn read_value(arg: Option<String>) -> Result<String> {
    match arg.as_deref() {
        Some("-") => {}
        Some(value) => return Ok(value.to_string()),
        None if std::io::stdin().is_terminal() => return Ok(String::new()),
        None => {}
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read value from stdin")?;
    Ok(buf.trim().to_string())
}
