//! Parsing of human move text.
//!
//! Moves are typed as `col,row`, both 1-indexed, e.g. `1,2` is the first
//! column of the second row.

use anyhow::{bail, Context, Result};
use connectn_board::{GameState, Move};

/// What the player typed at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Exit,
    Skip,
}

/// Parse one input line against the current position.
///
/// # Errors
/// Fails on malformed text, coordinates off the board, or an occupied cell.
pub fn parse_command(line: &str, state: &GameState) -> Result<Command> {
    let line = line.trim();
    match line {
        "exit" => return Ok(Command::Exit),
        "" => return Ok(Command::Skip),
        _ => {}
    }

    let (col, row) = line
        .split_once(',')
        .with_context(|| format!("expected \"col,row\", got {:?}", line))?;
    let col = parse_coordinate(col, state.size()).context("bad column")?;
    let row = parse_coordinate(row, state.size()).context("bad row")?;

    if let Some(mark) = state.cell(row, col) {
        bail!("cell {},{} is already taken by \"{}\"", col + 1, row + 1, mark);
    }

    Ok(Command::Play(Move::from_coords(row, col, state.size())))
}

/// Parse a 1-indexed coordinate into a 0-indexed one.
fn parse_coordinate(text: &str, size: usize) -> Result<usize> {
    let value: usize = text
        .trim()
        .parse()
        .with_context(|| format!("{:?} is not a number", text.trim()))?;
    if value == 0 || value > size {
        bail!("{} is outside 1..={}", value, size);
    }
    Ok(value - 1)
}
