use std::io::{BufRead, Write};

use anyhow::Result;

use super::commands::is_affirmative;
use super::console::Console;
use crate::history::HistoryStore;

pub(super) fn show_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    history: &HistoryStore,
) -> Result<()> {
    if history.is_empty() {
        console.error("\nNo games played yet.")?;
        return Ok(());
    }
    console.heading("\n--- Game History ---")?;
    for line in history.show() {
        console.say(line)?;
    }
    console.heading("--------------------")
}

pub(super) fn clear_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    history: &mut HistoryStore,
) -> Result<()> {
    if history.is_empty() {
        console.error("No history to clear.")?;
        return Ok(());
    }
    let answer =
        console.ask_keyword("Are you sure you want to delete all saved history? (yes/no): ")?;
    if answer.as_deref().is_some_and(is_affirmative) {
        history.clear()?;
        console.success("History cleared successfully.")
    } else {
        console.say("Canceled. History not deleted.")
    }
}
