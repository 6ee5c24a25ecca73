use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use crossterm::style::Stylize;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::commands::{is_affirmative, is_exit};
use super::console::Console;
use crate::history::{GameRecord, GameResult, HistoryStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Throw {
    Rock,
    Paper,
    Scissors,
}

const THROW_ALIASES: &[(&str, Throw)] = &[
    ("rock", Throw::Rock),
    ("r", Throw::Rock),
    ("paper", Throw::Paper),
    ("p", Throw::Paper),
    ("scissors", Throw::Scissors),
    ("s", Throw::Scissors),
];

impl Throw {
    pub(crate) const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub(crate) fn parse(input: &str) -> Option<Self> {
        THROW_ALIASES
            .iter()
            .find(|(alias, _)| *alias == input)
            .map(|(_, throw)| *throw)
    }

    pub(crate) fn beats(self, other: Throw) -> bool {
        matches!(
            (self, other),
            (Throw::Rock, Throw::Scissors)
                | (Throw::Scissors, Throw::Paper)
                | (Throw::Paper, Throw::Rock)
        )
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Throw::Rock => "rock",
            Throw::Paper => "paper",
            Throw::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundOutcome {
    Tie,
    Player,
    Opponent,
}

pub(crate) fn judge(player: Throw, opponent: Throw) -> RoundOutcome {
    if player == opponent {
        RoundOutcome::Tie
    } else if player.beats(opponent) {
        RoundOutcome::Player
    } else {
        RoundOutcome::Opponent
    }
}

pub(crate) trait Opponent {
    fn throw(&mut self) -> Throw;
}

pub(crate) struct RandomOpponent {
    rng: SmallRng,
}

impl RandomOpponent {
    pub(crate) fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Opponent for RandomOpponent {
    fn throw(&mut self) -> Throw {
        Throw::ALL[self.rng.random_range(0..Throw::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Score {
    pub(crate) player: u32,
    pub(crate) opponent: u32,
}

impl Score {
    fn apply(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Tie => {}
            RoundOutcome::Player => self.player += 1,
            RoundOutcome::Opponent => self.opponent += 1,
        }
    }
}

pub(crate) fn run_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    opponent: &mut impl Opponent,
    history: &mut HistoryStore,
) -> Result<()> {
    loop {
        let Some(rounds) = ask_rounds(console)? else {
            return Ok(());
        };
        let Some(score) = play_session(console, opponent, rounds)? else {
            log::info!("game session aborted before round {rounds} completed");
            return Ok(());
        };

        let record = GameRecord::finished(
            score.player,
            score.opponent,
            rounds,
            Local::now().naive_local(),
        );
        match record.result {
            GameResult::Win => console.say("\n🎉 You won the game!".green())?,
            GameResult::Loss => console.say("\n💀 You lost the game.".red())?,
            GameResult::Tie => console.say("\n🤝 It's a tie!".yellow())?,
        }
        log::info!(
            "game session finished: {:?} {}-{} over {rounds} round(s)",
            record.result,
            score.player,
            score.opponent
        );
        history.append(record)?;

        let again = console.ask_keyword("Play again? (yes/no): ")?;
        if !again.as_deref().is_some_and(is_affirmative) {
            return Ok(());
        }
    }
}

fn ask_rounds<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<u32>> {
    loop {
        let Some(answer) =
            console.ask_keyword("How many rounds would you like to play? (number or \"exit\"): ")?
        else {
            return Ok(None);
        };
        if is_exit(&answer) {
            return Ok(None);
        }
        match answer.parse::<i64>() {
            Ok(rounds) if rounds <= 0 => console.error("Enter a positive number.")?,
            Ok(rounds) => match u32::try_from(rounds) {
                Ok(rounds) => return Ok(Some(rounds)),
                Err(_) => console.error("That is too many rounds.")?,
            },
            Err(_) => console.error("Invalid input.")?,
        }
    }
}

/// Play `rounds` decided rounds. `None` when the player aborts.
pub(crate) fn play_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    opponent: &mut impl Opponent,
    rounds: u32,
) -> Result<Option<Score>> {
    let mut score = Score::default();
    let mut round = 1;
    while round <= rounds {
        console.heading(&format!("\n--- Round {round} ---"))?;
        let Some(answer) = console.ask_keyword("Enter rock, paper, or scissors (or \"exit\"): ")?
        else {
            return Ok(None);
        };
        if is_exit(&answer) {
            return Ok(None);
        }
        let Some(player) = Throw::parse(&answer) else {
            console.error("Invalid choice. Try again.")?;
            continue;
        };

        let computer = opponent.throw();
        console.say(format!("Computer chose: {computer}"))?;
        let outcome = judge(player, computer);
        match outcome {
            RoundOutcome::Tie => console.say("🤝 Tie!".yellow())?,
            RoundOutcome::Player => console.success("✅ You win this round!")?,
            RoundOutcome::Opponent => console.error("❌ Computer wins this round!")?,
        }
        score.apply(outcome);
        round += 1;
    }
    Ok(Some(score))
}
