//! Subcommand implementations.
//!
//! Each command writes its human-readable output to the supplied writer so
//! that tests can capture it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use shedding_core::cards::format_cards;
use shedding_core::deck::deal;
use shedding_core::moves::playable_combinations;
use shedding_core::{Card, ClassifiedHand, LastPlay, PlayValidator, classify, parse_cards};

use crate::protocol::handle_line;

/// Parse card arguments; each argument may itself hold several cards.
pub fn parse_args(args: &[String]) -> Result<Vec<Card>> {
    let joined = args.join(" ");
    parse_cards(&joined).with_context(|| format!("invalid cards '{joined}'"))
}

/// Build the table state from an optional `--last` argument.
///
/// A last play that does not classify is kept as-is so the validator's
/// unrecognised-prior policy applies to it.
pub fn last_play(last: Option<&str>) -> Result<LastPlay> {
    match last {
        None => Ok(LastPlay::Absent),
        Some(notation) => {
            let cards = parse_cards(notation)
                .with_context(|| format!("invalid last play '{notation}'"))?;
            Ok(LastPlay::Valid(classify(&cards)))
        }
    }
}

fn describe(hand: &ClassifiedHand) -> String {
    let mut line = hand.to_string();
    if let Some(value) = hand.straight_value() {
        line.push_str(&format!(" value={value}"));
    }
    if let Some((triple, pair)) = hand.full_house_ranks() {
        line.push_str(&format!(" triple={triple} pair={pair}"));
    }
    line
}

pub fn classify_cmd(out: &mut impl Write, cards: &[Card]) -> Result<()> {
    writeln!(out, "{}", describe(&classify(cards)))?;
    Ok(())
}

/// Returns whether the play is legal.
pub fn check_cmd(
    out: &mut impl Write,
    validator: &PlayValidator,
    cards: &[Card],
    last: &LastPlay,
) -> Result<bool> {
    match validator.judge(cards, last) {
        Ok(acceptance) => {
            writeln!(out, "legal: {acceptance}")?;
            Ok(true)
        }
        Err(rejection) => {
            writeln!(out, "illegal: {rejection}")?;
            Ok(false)
        }
    }
}

pub fn hints_cmd(
    out: &mut impl Write,
    validator: &PlayValidator,
    hand: &[Card],
    last: &LastPlay,
) -> Result<()> {
    let plays = playable_combinations(hand, last, validator)?;
    if plays.is_empty() {
        writeln!(out, "pass")?;
    }
    for play in &plays {
        writeln!(out, "{}", describe(play))?;
    }
    Ok(())
}

pub fn deal_cmd(out: &mut impl Write, players: usize) -> Result<()> {
    for (seat, hand) in deal(players)?.iter().enumerate() {
        writeln!(out, "seat {}: {}", seat + 1, format_cards(hand))?;
    }
    Ok(())
}

/// Serve JSON-lines requests until `input` is exhausted.
pub fn stdio_cmd(
    input: impl BufRead,
    out: &mut impl Write,
    validator: &PlayValidator,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read request")?;
        if let Some(response) = handle_line(validator, &line) {
            serde_json::to_writer(&mut *out, &response)?;
            writeln!(out)?;
            out.flush()?;
        }
    }
    tracing::info!("input closed");
    Ok(())
}
