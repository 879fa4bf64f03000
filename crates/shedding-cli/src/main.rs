use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shedding_core::{PlayValidator, PriorPlayPolicy, RulesConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod protocol;

#[derive(Parser)]
#[command(name = "shedding")]
#[command(
    about = "Classify and validate plays for the thirteen-card shedding game",
    long_about = None
)]
struct Cli {
    /// JSON rules file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reject plays made on top of an unrecognised previous play
    #[arg(long, global = true)]
    fail_closed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a set of cards, e.g. `shedding classify 7♦ 7♣ 7♥ Ks Kd`
    Classify {
        #[arg(required = true)]
        cards: Vec<String>,
    },

    /// Check whether a play is legal on top of the last play
    Check {
        /// Cards of the last accepted play (omit when leading)
        #[arg(short, long)]
        last: Option<String>,

        #[arg(required = true)]
        cards: Vec<String>,
    },

    /// List every legal play from a hand
    Hints {
        /// Cards of the last accepted play (omit when leading)
        #[arg(short, long)]
        last: Option<String>,

        #[arg(required = true)]
        hand: Vec<String>,
    },

    /// Shuffle and deal thirteen cards to each player
    Deal {
        #[arg(short, long, default_value_t = 4)]
        players: usize,
    },

    /// Answer JSON-lines requests on stdin
    Stdio,
}

fn load_rules(cli: &Cli) -> Result<RulesConfig> {
    let mut rules = match &cli.config {
        Some(path) => RulesConfig::from_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };
    if cli.fail_closed {
        rules.unrecognised_prior = PriorPlayPolicy::FailClosed;
    }
    Ok(rules)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let validator = PlayValidator::new(load_rules(&cli)?);
    tracing::debug!(rules = ?validator.config(), "loaded rules");
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Classify { cards } => {
            commands::classify_cmd(&mut out, &commands::parse_args(&cards)?)?;
        }
        Command::Check { last, cards } => {
            let last = commands::last_play(last.as_deref())?;
            let cards = commands::parse_args(&cards)?;
            if !commands::check_cmd(&mut out, &validator, &cards, &last)? {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Hints { last, hand } => {
            let last = commands::last_play(last.as_deref())?;
            commands::hints_cmd(&mut out, &validator, &commands::parse_args(&hand)?, &last)?;
        }
        Command::Deal { players } => commands::deal_cmd(&mut out, players)?,
        Command::Stdio => commands::stdio_cmd(io::stdin().lock(), &mut out, &validator)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable (respects RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
